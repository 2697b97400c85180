//! Rendering for the title and game-over screens.

use super::game_common::{create_game_layout, render_status_bar, QUIT_CONTROL};
use super::sprites::{draw_sprite, draw_text_centered};
use super::viewport::Viewport;
use crate::assets::Assets;
use crate::constants::CREDIT_LINES;
use crate::game::types::{Point, Size};
use crate::screen::{GameOverInfo, MenuLayout};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    Frame,
};

/// Title screen: logo, credits and the start button.
pub fn render_start(
    frame: &mut Frame,
    area: Rect,
    surface: Size,
    layout: &MenuLayout,
    assets: &Assets,
) -> Viewport {
    let game_layout = create_game_layout(frame, area, " Soaring ", Color::Cyan);
    let viewport = Viewport::new(game_layout.content, surface);

    let buf = frame.buffer_mut();
    draw_sprite(buf, &viewport, &assets.logo, &layout.logo);
    for (line, center) in CREDIT_LINES.iter().zip(layout.credit_lines) {
        draw_text_centered(
            buf,
            &viewport,
            center,
            line,
            Style::default().fg(Color::Gray),
        );
    }
    draw_sprite(buf, &viewport, &assets.start_button, &layout.start_button);

    render_status_bar(
        frame,
        game_layout.status_bar,
        "Click START to play",
        Color::Yellow,
        &[("[Enter/Click]", "Start"), QUIT_CONTROL],
    );

    viewport
}

/// Game-over screen: how the session ended, the score and the restart button.
pub fn render_game_over(
    frame: &mut Frame,
    area: Rect,
    surface: Size,
    info: &GameOverInfo,
    layout: &MenuLayout,
    assets: &Assets,
) -> Viewport {
    let game_layout = create_game_layout(frame, area, " Game Over ", Color::Red);
    let viewport = Viewport::new(game_layout.content, surface);

    let button = layout.restart_button;
    let title_center = Point::new(button.center().x, button.top() - 90.0);
    let message_center = Point::new(button.center().x, button.top() - 50.0);

    let buf = frame.buffer_mut();
    draw_text_centered(
        buf,
        &viewport,
        title_center,
        "GAME OVER",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    );
    draw_text_centered(
        buf,
        &viewport,
        message_center,
        info.cause.describe(),
        Style::default().fg(Color::White),
    );
    if let Some(score) = info.score {
        draw_text_centered(
            buf,
            &viewport,
            Point::new(button.center().x, button.bottom() + 40.0),
            &format!("Score: {}", score),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    }
    draw_sprite(buf, &viewport, &assets.restart, &button);

    render_status_bar(
        frame,
        game_layout.status_bar,
        "Click RESTART to fly again",
        Color::Yellow,
        &[("[Enter/Click]", "Restart"), QUIT_CONTROL],
    );

    viewport
}
