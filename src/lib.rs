//! Soaring - a terminal arcade game.
//!
//! A bird falls under gravity and flaps upward on input while trees scroll
//! in from the right. The simulation, the screen state machine and the frame
//! loop are exposed for testing; the `ui` module draws them with ratatui.

pub mod assets;
pub mod build_info;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod game_loop;
pub mod logging;
pub mod paths;
pub mod screen;
pub mod ui;

pub use assets::{AssetCatalog, Assets};
pub use config::GameConfig;
pub use error::{Error, Result};
pub use game_loop::{Frontend, RunSummary};
pub use screen::{App, InputEvent, Screen};
