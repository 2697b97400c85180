//! Screen state machine: Start → Play → GameOver → Play → …
//!
//! The `App` owns the active screen and everything a session needs. Input
//! arrives as already-decoded `InputEvent`s; the frontend decides how keys and
//! mouse presses map onto them.

use crate::assets::Assets;
use crate::config::GameConfig;
use crate::constants::{CREDIT_LINE_SPACING, LOGO_OFFSET_Y, START_BUTTON_OFFSET_Y};
use crate::game::logic::{self, TickEvents};
use crate::game::types::{Bounds, Point, Session, SpriteMetrics, TerminationCause};
use log::{debug, info};
use rand::Rng;

/// Decoded user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Leave the game immediately.
    Quit,
    /// Primary press at a point on the logical surface.
    Activate(Point),
}

/// What the caller should do after handling input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// The screen changed.
    Transitioned,
    Quit,
}

/// How the last session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverInfo {
    /// Final score, when scoring is enabled.
    pub score: Option<u32>,
    pub cause: TerminationCause,
    /// Frames the session lasted.
    pub frames: u64,
}

/// The active screen.
#[derive(Debug, Clone)]
pub enum Screen {
    Start,
    Play(Session),
    GameOver(GameOverInfo),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Start => "start",
            Screen::Play(_) => "play",
            Screen::GameOver(_) => "game-over",
        }
    }
}

/// Where the menu controls sit on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuLayout {
    pub logo: Bounds,
    pub start_button: Bounds,
    pub restart_button: Bounds,
    /// Centers of the credit text lines on the start screen.
    pub credit_lines: [Point; 2],
}

impl MenuLayout {
    pub fn new(config: &GameConfig, assets: &Assets) -> Self {
        let center = config.center();
        Self {
            logo: Bounds::centered_on(
                Point::new(center.x, center.y + LOGO_OFFSET_Y),
                assets.logo.size,
            ),
            start_button: Bounds::centered_on(
                Point::new(center.x, center.y + START_BUTTON_OFFSET_Y),
                assets.start_button.size,
            ),
            restart_button: Bounds::centered_on(center, assets.restart.size),
            credit_lines: [center, Point::new(center.x, center.y + CREDIT_LINE_SPACING)],
        }
    }
}

/// Keyboard equivalents of a press. Flap keys only act on a running
/// session and the confirm key only on a menu button, so flapping through a
/// crash cannot also press restart.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyTargets {
    /// Space/Up: the bird.
    pub flap: Option<Point>,
    /// Enter: the current screen's button.
    pub button: Option<Point>,
}

fn game_over_info(session: &Session, cause: TerminationCause) -> GameOverInfo {
    GameOverInfo {
        score: session.scoring.then_some(session.score),
        cause,
        frames: session.frame_count,
    }
}

/// Whole-program state, passed by reference into the frame loop.
#[derive(Debug, Clone)]
pub struct App {
    pub screen: Screen,
    pub config: GameConfig,
    pub layout: MenuLayout,
    metrics: SpriteMetrics,
    /// Sessions started since launch.
    pub sessions_played: u32,
    /// Result of the most recent finished session.
    pub last_result: Option<GameOverInfo>,
}

impl App {
    /// Starts on the title screen, or straight in a session when the title
    /// screen is disabled.
    pub fn new(config: GameConfig, assets: &Assets) -> Self {
        let layout = MenuLayout::new(&config, assets);
        let mut app = Self {
            screen: Screen::Start,
            layout,
            metrics: assets.metrics(),
            config,
            sessions_played: 0,
            last_result: None,
        };
        if !app.config.start_screen {
            app.start_session();
        }
        app
    }

    /// Apply one input event to the current screen.
    pub fn handle_input(&mut self, event: InputEvent) -> Control {
        let point = match event {
            InputEvent::Quit => {
                info!("quit requested on {} screen", self.screen.name());
                return Control::Quit;
            }
            InputEvent::Activate(point) => point,
        };

        let button = match &mut self.screen {
            Screen::Start => self.layout.start_button,
            Screen::GameOver(_) => self.layout.restart_button,
            Screen::Play(session) => {
                logic::flap(session);
                return Control::Continue;
            }
        };

        if button.contains(point) {
            self.start_session();
            Control::Transitioned
        } else {
            Control::Continue
        }
    }

    /// Advance the simulation by one frame. Only the Play screen has any
    /// per-frame state.
    ///
    /// The frame a session ends on stays on the Play screen so the crash is
    /// drawn; the following tick moves the app to GameOver.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> TickEvents {
        let Screen::Play(session) = &mut self.screen else {
            return TickEvents::default();
        };

        if let Some(cause) = session.result {
            let result = game_over_info(session, cause);
            debug!("play -> game-over (session {})", self.sessions_played);
            self.screen = Screen::GameOver(result);
            return TickEvents::default();
        }

        let events = logic::process_tick(session, rng);
        if events.scored > 0 {
            debug!("score {} (+{})", session.score, events.scored);
        }

        if let Some(cause) = events.ended {
            let result = game_over_info(session, cause);
            info!(
                "session {} over after {} frames: {:?}, score {:?}",
                self.sessions_played, result.frames, cause, result.score
            );
            self.last_result = Some(result);
        }
        events
    }

    /// Where keyboard presses land on the current screen.
    pub fn key_targets(&self) -> KeyTargets {
        match &self.screen {
            Screen::Start => KeyTargets {
                flap: None,
                button: Some(self.layout.start_button.center()),
            },
            Screen::Play(session) if !session.is_over() => KeyTargets {
                flap: Some(Point::new(session.bird.x, session.bird.y)),
                button: None,
            },
            Screen::Play(_) => KeyTargets::default(),
            Screen::GameOver(_) => KeyTargets {
                flap: None,
                button: Some(self.layout.restart_button.center()),
            },
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.screen {
            Screen::Play(session) => Some(session),
            _ => None,
        }
    }

    /// Replace whatever was on screen with a fresh session.
    fn start_session(&mut self) {
        self.sessions_played += 1;
        debug!(
            "{} -> play (session {})",
            self.screen.name(),
            self.sessions_played
        );
        self.screen = Screen::Play(Session::new(&self.config, &self.metrics));
    }
}
