//! Rendering for the Play screen: trees, the bird and the score.

use super::game_common::{create_game_layout, render_status_bar, QUIT_CONTROL};
use super::sprites::{draw_sprite, draw_text};
use super::viewport::Viewport;
use crate::assets::Assets;
use crate::game::types::{Point, Session};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    Frame,
};

/// Score HUD position on the surface.
const SCORE_POSITION: Point = Point::new(10.0, 10.0);

/// Render a session and return the viewport the surface was mapped into.
pub fn render_play(frame: &mut Frame, area: Rect, session: &Session, assets: &Assets) -> Viewport {
    let layout = create_game_layout(frame, area, " Soaring ", Color::Cyan);
    let viewport = Viewport::new(layout.content, session.screen);

    let buf = frame.buffer_mut();
    for pipe in &session.pipes {
        draw_sprite(buf, &viewport, &assets.tree, &session.pipe_bounds(pipe));
    }
    draw_sprite(
        buf,
        &viewport,
        assets.bird_frame(session.bird.frame),
        &session.bird_bounds(),
    );

    if session.scoring {
        draw_text(
            buf,
            &viewport,
            SCORE_POSITION,
            &format!("Score: {}", session.score),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    }

    let status = if session.bird.velocity < 0.0 {
        "Climbing"
    } else {
        "Falling"
    };
    render_status_bar(
        frame,
        layout.status_bar,
        status,
        Color::Green,
        &[("[Space/Click]", "Flap"), QUIT_CONTROL],
    );

    viewport
}
