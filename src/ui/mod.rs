pub mod game_common;
pub mod menu_scene;
pub mod play_scene;
pub mod sprites;
pub mod terminal;
pub mod viewport;

use crate::assets::Assets;
use crate::screen::{App, Screen};
use ratatui::Frame;
use viewport::Viewport;

/// Draw the active screen over the whole frame. Returns where the logical
/// surface ended up so pointer input can be mapped back onto it.
pub fn draw(frame: &mut Frame, app: &App, assets: &Assets) -> Viewport {
    let area = frame.size();
    let surface = app.config.surface();
    match &app.screen {
        Screen::Start => menu_scene::render_start(frame, area, surface, &app.layout, assets),
        Screen::Play(session) => play_scene::render_play(frame, area, session, assets),
        Screen::GameOver(info) => {
            menu_scene::render_game_over(frame, area, surface, info, &app.layout, assets)
        }
    }
}
