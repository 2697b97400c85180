//! The fixed-cadence frame loop shared by the terminal game and headless runs.
//!
//! Each frame drains pending input once, applies it to the active screen,
//! advances the simulation, presents the result and then sleeps a fixed
//! delay. Physics is per frame, not per elapsed second.

use crate::assets::Assets;
use crate::screen::{App, Control, InputEvent};
use log::info;
use rand::Rng;
use std::io;
use std::thread;

/// Input and output for the loop. The terminal implements this with
/// crossterm/ratatui; tests use scripted fakes.
pub trait Frontend {
    /// Every event queued since the last call. Must not block.
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>>;

    /// Draw the current state of `app`.
    fn present(&mut self, app: &App, assets: &Assets) -> io::Result<()>;

    /// Give the device back once the loop is over.
    fn restore(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Totals reported when the loop exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub sessions: u32,
    pub last_score: Option<u32>,
}

/// Run one frame without pacing.
///
/// After an event changes the screen, the remaining activations in the same
/// batch are dropped so a double click cannot both start and flap. Quit is
/// always honored.
pub fn run_frame<F: Frontend, R: Rng>(
    app: &mut App,
    assets: &Assets,
    frontend: &mut F,
    rng: &mut R,
) -> io::Result<Control> {
    let mut outcome = Control::Continue;
    for event in frontend.poll_events()? {
        if outcome == Control::Transitioned && event != InputEvent::Quit {
            continue;
        }
        match app.handle_input(event) {
            Control::Quit => return Ok(Control::Quit),
            Control::Transitioned => outcome = Control::Transitioned,
            Control::Continue => {}
        }
    }

    let screen_before = app.screen.name();
    app.tick(rng);
    if app.screen.name() != screen_before {
        outcome = Control::Transitioned;
    }

    frontend.present(app, assets)?;
    Ok(outcome)
}

/// Loop until the player quits.
pub fn run<F: Frontend, R: Rng>(
    app: &mut App,
    assets: &Assets,
    frontend: &mut F,
    rng: &mut R,
) -> io::Result<RunSummary> {
    let delay = app.config.frame_delay();
    let mut frames = 0u64;

    loop {
        if run_frame(app, assets, frontend, rng)? == Control::Quit {
            break;
        }
        frames += 1;
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    let summary = RunSummary {
        frames,
        sessions: app.sessions_played,
        last_score: app.last_result.and_then(|r| r.score),
    };
    info!(
        "exiting after {} frames, {} sessions",
        summary.frames, summary.sessions
    );
    Ok(summary)
}

/// `run`, then `restore` the frontend whether or not the loop failed. A loop
/// error is reported ahead of a restore error.
pub fn run_and_restore<F: Frontend, R: Rng>(
    app: &mut App,
    assets: &Assets,
    frontend: &mut F,
    rng: &mut R,
) -> io::Result<RunSummary> {
    let result = run(app, assets, frontend, rng);
    let restored = frontend.restore();
    let summary = result?;
    restored?;
    Ok(summary)
}
