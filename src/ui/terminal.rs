//! Crossterm/ratatui frontend: owns the terminal, turns raw key and mouse
//! events into `InputEvent`s and draws each frame.

use super::viewport::Viewport;
use crate::assets::Assets;
use crate::game_loop::Frontend;
use crate::screen::{App, InputEvent, KeyTargets};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;

/// Translate one terminal event.
///
/// Space and Up flap, Enter presses the current screen's button; `targets`
/// says where each lands, if anywhere. Mouse presses land wherever they were
/// made, mapped through the last drawn `viewport`.
pub fn map_event(
    event: &Event,
    viewport: Option<&Viewport>,
    targets: &KeyTargets,
) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputEvent::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(InputEvent::Quit)
            }
            KeyCode::Char(' ') | KeyCode::Up => targets.flap.map(InputEvent::Activate),
            KeyCode::Enter => targets.button.map(InputEvent::Activate),
            _ => None,
        },
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => viewport
            .and_then(|vp| vp.to_logical(mouse.column, mouse.row))
            .map(InputEvent::Activate),
        _ => None,
    }
}

pub struct TerminalFrontend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    viewport: Option<Viewport>,
    targets: KeyTargets,
    restored: bool,
}

impl TerminalFrontend {
    /// Switch the terminal to raw mode on the alternate screen with mouse
    /// capture enabled.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        Ok(Self {
            terminal,
            viewport: None,
            targets: KeyTargets::default(),
            restored: false,
        })
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl Frontend for TerminalFrontend {
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            let raw = event::read()?;
            if let Some(input) = map_event(&raw, self.viewport.as_ref(), &self.targets) {
                events.push(input);
            }
        }
        Ok(events)
    }

    fn present(&mut self, app: &App, assets: &Assets) -> io::Result<()> {
        let mut viewport = None;
        self.terminal.draw(|frame| {
            viewport = Some(super::draw(frame, app, assets));
        })?;
        self.viewport = viewport;
        self.targets = app.key_targets();
        Ok(())
    }

    /// Give the terminal back. Safe to call more than once.
    fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()
    }
}
