//! Mapping between the logical surface and terminal cells.
//!
//! The surface is stretched over the whole content area, independently on
//! each axis, so a 400×600 surface fills a wide terminal as well as a narrow
//! one.

use crate::game::types::{Bounds, Point, Size};
use ratatui::layout::Rect;

/// A block of cells in absolute terminal coordinates. `right` and `bottom`
/// are exclusive. May extend past the viewport; callers clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpan {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl CellSpan {
    pub fn width(&self) -> usize {
        (self.right - self.left).max(0) as usize
    }

    pub fn height(&self) -> usize {
        (self.bottom - self.top).max(0) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Cells the surface is drawn into.
    pub area: Rect,
    /// Logical surface size.
    pub logical: Size,
}

impl Viewport {
    pub fn new(area: Rect, logical: Size) -> Self {
        Self { area, logical }
    }

    /// Logical x to fractional cells from the left of the area.
    fn cells_x(&self, x: f64) -> f64 {
        x * self.area.width as f64 / self.logical.width
    }

    fn cells_y(&self, y: f64) -> f64 {
        y * self.area.height as f64 / self.logical.height
    }

    /// Terminal column holding logical `x`.
    pub fn column(&self, x: f64) -> i32 {
        self.area.x as i32 + self.cells_x(x).floor() as i32
    }

    /// Terminal row holding logical `y`.
    pub fn row(&self, y: f64) -> i32 {
        self.area.y as i32 + self.cells_y(y).floor() as i32
    }

    /// Cells covered by a logical rectangle, at least one in each direction.
    pub fn cell_span(&self, bounds: &Bounds) -> CellSpan {
        let left = self.cells_x(bounds.left()).round() as i32;
        let top = self.cells_y(bounds.top()).round() as i32;
        let right = (self.cells_x(bounds.right()).round() as i32).max(left + 1);
        let bottom = (self.cells_y(bounds.bottom()).round() as i32).max(top + 1);
        CellSpan {
            left: self.area.x as i32 + left,
            top: self.area.y as i32 + top,
            right: self.area.x as i32 + right,
            bottom: self.area.y as i32 + bottom,
        }
    }

    pub fn contains_cell(&self, column: i32, row: i32) -> bool {
        column >= self.area.left() as i32
            && column < self.area.right() as i32
            && row >= self.area.top() as i32
            && row < self.area.bottom() as i32
    }

    /// Logical point at the center of a terminal cell, if the cell is inside
    /// the viewport.
    pub fn to_logical(&self, column: u16, row: u16) -> Option<Point> {
        if self.area.width == 0
            || self.area.height == 0
            || !self.contains_cell(column as i32, row as i32)
        {
            return None;
        }
        let x = (column - self.area.x) as f64 + 0.5;
        let y = (row - self.area.y) as f64 + 0.5;
        Some(Point::new(
            x * self.logical.width / self.area.width as f64,
            y * self.logical.height / self.area.height as f64,
        ))
    }
}
