//! Stretches ASCII art sprites over terminal cells and draws text on the
//! logical surface.

use super::viewport::Viewport;
use crate::assets::Sprite;
use crate::game::types::{Bounds, Point};
use ratatui::buffer::Buffer;
use ratatui::style::Style;

/// Art lines split into characters, sampled nearest-neighbour at the center
/// of each target cell. Short lines read as spaces past their end.
struct Art {
    lines: Vec<Vec<char>>,
    width: usize,
}

impl Art {
    fn new(art: &[String]) -> Self {
        let lines: Vec<Vec<char>> = art.iter().map(|line| line.chars().collect()).collect();
        let width = lines.iter().map(Vec::len).max().unwrap_or(0);
        Self { lines, width }
    }

    /// Character for cell (`col`, `row`) of a `cols` × `rows` stretch.
    fn sample(&self, col: usize, row: usize, cols: usize, rows: usize) -> char {
        if self.lines.is_empty() || self.width == 0 {
            return ' ';
        }
        let line = &self.lines[nearest(row, rows, self.lines.len())];
        line.get(nearest(col, cols, self.width))
            .copied()
            .unwrap_or(' ')
    }
}

/// Source index whose span holds the center of target cell `i` of `n`.
fn nearest(i: usize, n: usize, source: usize) -> usize {
    (((2 * i + 1) * source) / (2 * n)).min(source - 1)
}

/// Nearest-neighbour resample of `art` to `cols` × `rows` characters.
pub fn scale_art(art: &[String], cols: usize, rows: usize) -> Vec<Vec<char>> {
    let art = Art::new(art);
    (0..rows)
        .map(|r| (0..cols).map(|c| art.sample(c, r, cols, rows)).collect())
        .collect()
}

/// Draw `sprite` stretched over the cells `bounds` covers. Spaces are
/// transparent. Only cells inside the viewport are sampled, so a sprite much
/// larger than the screen costs no more than one that fits.
pub fn draw_sprite(buf: &mut Buffer, viewport: &Viewport, sprite: &Sprite, bounds: &Bounds) {
    let span = viewport.cell_span(bounds);
    let (cols, rows) = (span.width(), span.height());
    let area = viewport.area;
    let art = Art::new(&sprite.art);

    for row in span.top.max(area.top() as i32)..span.bottom.min(area.bottom() as i32) {
        for column in span.left.max(area.left() as i32)..span.right.min(area.right() as i32) {
            let ch = art.sample(
                (column - span.left) as usize,
                (row - span.top) as usize,
                cols,
                rows,
            );
            if ch == ' ' {
                continue;
            }
            buf.get_mut(column as u16, row as u16)
                .set_char(ch)
                .set_fg(sprite.color);
        }
    }
}

/// Draw `text` starting at the cell holding `at`, clipped to the viewport.
pub fn draw_text(buf: &mut Buffer, viewport: &Viewport, at: Point, text: &str, style: Style) {
    draw_text_at_cell(buf, viewport, viewport.column(at.x), viewport.row(at.y), text, style);
}

/// Draw `text` centered on the cell holding `center`.
pub fn draw_text_centered(
    buf: &mut Buffer,
    viewport: &Viewport,
    center: Point,
    text: &str,
    style: Style,
) {
    let width = text.chars().count() as i32;
    let column = viewport.column(center.x) - width / 2;
    draw_text_at_cell(buf, viewport, column, viewport.row(center.y), text, style);
}

fn draw_text_at_cell(
    buf: &mut Buffer,
    viewport: &Viewport,
    column: i32,
    row: i32,
    text: &str,
    style: Style,
) {
    let area = viewport.area;
    if row < area.top() as i32 || row >= area.bottom() as i32 {
        return;
    }
    let skip = (area.left() as i32 - column).max(0) as usize;
    let start = column.max(area.left() as i32);
    let room = (area.right() as i32 - start).max(0) as usize;
    let visible: String = text.chars().skip(skip).take(room).collect();
    if !visible.is_empty() {
        buf.set_string(start as u16, row as u16, visible, style);
    }
}
