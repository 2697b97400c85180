// Surface size in logical units
pub const SCREEN_WIDTH: f64 = 400.0;
pub const SCREEN_HEIGHT: f64 = 600.0;

// Physics, all per frame
pub const SCROLL_SPEED: f64 = 5.0;
pub const GRAVITY: f64 = 1.0;
pub const FLAP_POWER: f64 = 15.0;

// Bird
pub const BIRD_X: f64 = 50.0;
pub const ANIMATION_SPEED: u32 = 5; // frames per sprite change

// Trees
pub const SPAWN_INTERVAL: f64 = 1600.0;
pub const MIN_PIPE_HEIGHT: f64 = 100.0;

// Frame pacing
pub const FRAME_DELAY_MS: u64 = 17;

// Menu layout, offsets from the surface center
pub const LOGO_OFFSET_Y: f64 = -100.0;
pub const START_BUTTON_OFFSET_Y: f64 = 100.0;
pub const CREDIT_LINE_SPACING: f64 = 30.0;

pub const CREDIT_LINES: [&str; 2] = ["© 2023 Christian Tejada.", "Images from Freepik"];

// Largest sprite side an asset pack may declare
pub const MAX_SPRITE_EXTENT: f64 = 4.0 * SCREEN_HEIGHT;

// Sprite lookup keys
pub const BIRD_FRAME_KEYS: [&str; 3] = ["bird1", "bird2", "bird3"];
pub const TREE_KEY: &str = "tree";
pub const RESTART_KEY: &str = "restart";
pub const START_BUTTON_KEY: &str = "start_button";
pub const LOGO_KEY: &str = "logo";

pub const APP_NAME: &str = "soaring";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "soaring.log";
