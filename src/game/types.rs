//! Data structures for a play session: the bird, the tree stream and the
//! geometry used to test them against each other.

use crate::config::GameConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A position on the logical surface. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` whose center sits on `center`.
    pub fn centered_on(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Horizontal projections share a non-empty interval.
    pub fn overlaps_horizontally(&self, other: &Bounds) -> bool {
        self.left() < other.right() && other.left() < self.right()
    }

    /// Vertical projections share a non-empty interval.
    pub fn overlaps_vertically(&self, other: &Bounds) -> bool {
        self.top() < other.bottom() && other.top() < self.bottom()
    }

    /// Both projections overlap. Rectangles that only touch along an edge
    /// do not overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.overlaps_horizontally(other) && self.overlaps_vertically(other)
    }

    /// Point-in-rectangle with the right and bottom edges excluded.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// How a bird/tree hit is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The bird's sprite rectangle overlaps the tree's sprite rectangle.
    #[default]
    FullRect,
    /// The horizontal extents overlap and the bird is below the tree top.
    Threshold,
}

impl CollisionPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FullRect => "full-rect",
            Self::Threshold => "threshold",
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "full-rect" | "rect" => Ok(Self::FullRect),
            "threshold" => Ok(Self::Threshold),
            other => Err(format!(
                "unknown collision policy '{}' (expected full-rect or threshold)",
                other
            )),
        }
    }
}

/// Why a play session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationCause {
    /// The bird left the surface through the top or bottom.
    OutOfBounds,
    /// The bird hit a tree.
    Collision,
}

impl TerminationCause {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::OutOfBounds => "You flew out of the sky.",
            Self::Collision => "You crashed into a tree.",
        }
    }
}

/// Sprite sizes the simulation needs for hit-testing.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteMetrics {
    /// One entry per bird animation frame.
    pub bird_frames: Vec<Size>,
    pub tree: Size,
}

/// The player's bird. Only `y` moves; `x` is fixed for the whole session.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    /// Vertical velocity in units/frame, positive = downward.
    pub velocity: f64,
    /// Index into the animation frames.
    pub frame: usize,
    /// Frames since the last animation step.
    pub animation_delay: u32,
    frame_count: usize,
}

impl Bird {
    pub fn new(x: f64, y: f64, frame_count: usize) -> Self {
        Self {
            x,
            y,
            velocity: 0.0,
            frame: 0,
            animation_delay: 0,
            frame_count: frame_count.max(1),
        }
    }

    /// Overwrite the velocity with an upward impulse.
    pub fn flap(&mut self, flap_power: f64) {
        self.velocity = -flap_power;
    }

    /// One frame of motion: gravity first, then position, then animation.
    pub fn advance(&mut self, gravity: f64, animation_speed: u32) {
        self.velocity += gravity;
        self.y += self.velocity;

        self.animation_delay += 1;
        if self.animation_delay >= animation_speed {
            self.animation_delay = 0;
            self.frame = (self.frame + 1) % self.frame_count;
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Hitbox for the current animation frame, centered on the bird.
    pub fn bounds(&self, metrics: &SpriteMetrics) -> Bounds {
        let size = metrics
            .bird_frames
            .get(self.frame)
            .or_else(|| metrics.bird_frames.first())
            .copied()
            .unwrap_or(Size::new(0.0, 0.0));
        Bounds::centered_on(Point::new(self.x, self.y), size)
    }
}

/// A tree growing up from the bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Left edge (float for smooth scrolling).
    pub x: f64,
    /// How far the tree reaches up from the bottom of the surface.
    pub height: f64,
    /// Whether the bird has passed this tree (for scoring).
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f64, height: f64) -> Self {
        Self {
            x,
            height,
            passed: false,
        }
    }

    /// Y coordinate of the tree's top edge.
    pub fn top(&self, screen_height: f64) -> f64 {
        screen_height - self.height
    }

    /// Sprite rectangle, anchored at the top edge. It may extend below the
    /// surface.
    pub fn bounds(&self, screen_height: f64, size: Size) -> Bounds {
        Bounds::new(self.x, self.top(screen_height), size.width, size.height)
    }
}

/// State of one Play session. Rebuilt from scratch on every restart.
#[derive(Debug, Clone)]
pub struct Session {
    pub bird: Bird,
    /// Active trees in spawn order.
    pub pipes: Vec<Pipe>,
    /// Trees passed this session.
    pub score: u32,
    /// Frames simulated so far.
    pub frame_count: u64,
    /// Set once the session has ended.
    pub result: Option<TerminationCause>,

    // Cached tuning
    pub screen: Size,
    pub gravity: f64,
    pub flap_power: f64,
    pub scroll_speed: f64,
    pub spawn_interval: f64,
    pub min_pipe_height: f64,
    pub animation_speed: u32,
    pub collision: CollisionPolicy,
    pub scoring: bool,
    pub metrics: SpriteMetrics,
}

impl Session {
    /// A fresh session: bird at mid-height, at rest, no trees, zero score.
    pub fn new(config: &GameConfig, metrics: &SpriteMetrics) -> Self {
        Self {
            bird: Bird::new(
                config.bird_x,
                config.height / 2.0,
                metrics.bird_frames.len(),
            ),
            pipes: Vec::new(),
            score: 0,
            frame_count: 0,
            result: None,

            screen: Size::new(config.width, config.height),
            gravity: config.gravity,
            flap_power: config.flap_power,
            scroll_speed: config.scroll_speed,
            spawn_interval: config.spawn_interval,
            min_pipe_height: config.min_pipe_height,
            animation_speed: config.animation_speed,
            collision: config.collision,
            scoring: config.scoring,
            metrics: metrics.clone(),
        }
    }

    pub fn bird_bounds(&self) -> Bounds {
        self.bird.bounds(&self.metrics)
    }

    pub fn pipe_bounds(&self, pipe: &Pipe) -> Bounds {
        pipe.bounds(self.screen.height, self.metrics.tree)
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> SpriteMetrics {
        SpriteMetrics {
            bird_frames: vec![Size::new(34.0, 24.0); 3],
            tree: Size::new(80.0, 300.0),
        }
    }

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(&GameConfig::default(), &metrics());
        assert!((session.bird.y - 300.0).abs() < f64::EPSILON);
        assert!((session.bird.x - 50.0).abs() < f64::EPSILON);
        assert_eq!(session.bird.velocity, 0.0);
        assert_eq!(session.bird.frame, 0);
        assert!(session.pipes.is_empty());
        assert_eq!(session.score, 0);
        assert!(session.result.is_none());
        assert_eq!(session.collision, CollisionPolicy::FullRect);
    }

    #[test]
    fn test_flap_overwrites_velocity() {
        let mut bird = Bird::new(50.0, 300.0, 3);
        bird.velocity = 100.0;
        bird.flap(15.0);
        assert_eq!(bird.velocity, -15.0);

        bird.velocity = -40.0;
        bird.flap(15.0);
        assert_eq!(bird.velocity, -15.0);
    }

    #[test]
    fn test_advance_applies_gravity_before_position() {
        let mut bird = Bird::new(50.0, 300.0, 3);
        bird.velocity = -3.0;
        bird.advance(1.0, 5);
        assert_eq!(bird.velocity, -2.0);
        assert_eq!(bird.y, 298.0);
    }

    #[test]
    fn test_animation_cycles_every_n_frames() {
        let mut bird = Bird::new(50.0, 300.0, 3);
        let mut seen = Vec::new();
        for _ in 0..15 {
            bird.advance(0.0, 5);
            seen.push(bird.frame);
        }
        assert_eq!(seen, vec![0, 0, 0, 0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 0]);
    }

    #[test]
    fn test_bird_with_no_frames_still_animates_safely() {
        let mut bird = Bird::new(50.0, 300.0, 0);
        assert_eq!(bird.frame_count(), 1);
        for _ in 0..10 {
            bird.advance(0.0, 1);
        }
        assert_eq!(bird.frame, 0);
    }

    #[test]
    fn test_bird_bounds_centered() {
        let bird = Bird::new(50.0, 300.0, 3);
        let b = bird.bounds(&metrics());
        assert_eq!(b.center(), Point::new(50.0, 300.0));
        assert_eq!(b.left(), 33.0);
        assert_eq!(b.top(), 288.0);
    }

    #[test]
    fn test_pipe_top_and_bounds() {
        let pipe = Pipe::new(200.0, 150.0);
        assert_eq!(pipe.top(600.0), 450.0);
        let b = pipe.bounds(600.0, Size::new(80.0, 300.0));
        assert_eq!(b, Bounds::new(200.0, 450.0, 80.0, 300.0));
    }

    #[test]
    fn test_contains_excludes_far_edges() {
        let b = Bounds::new(10.0, 10.0, 20.0, 20.0);
        assert!(b.contains(Point::new(10.0, 10.0)));
        assert!(b.contains(Point::new(29.9, 29.9)));
        assert!(!b.contains(Point::new(30.0, 15.0)));
        assert!(!b.contains(Point::new(15.0, 30.0)));
        assert!(!b.contains(Point::new(9.9, 15.0)));
    }

    #[test]
    fn test_collision_policy_parsing() {
        assert_eq!(
            "full-rect".parse::<CollisionPolicy>(),
            Ok(CollisionPolicy::FullRect)
        );
        assert_eq!(
            "FULL_RECT".parse::<CollisionPolicy>(),
            Ok(CollisionPolicy::FullRect)
        );
        assert_eq!(
            "threshold".parse::<CollisionPolicy>(),
            Ok(CollisionPolicy::Threshold)
        );
        assert!("diagonal".parse::<CollisionPolicy>().is_err());
        assert_eq!(CollisionPolicy::Threshold.to_string(), "threshold");
    }

    #[test]
    fn test_collision_policy_serde_names() {
        let json = serde_json::to_string(&CollisionPolicy::FullRect).unwrap();
        assert_eq!(json, "\"full_rect\"");
        let parsed: CollisionPolicy = serde_json::from_str("\"threshold\"").unwrap();
        assert_eq!(parsed, CollisionPolicy::Threshold);
    }
}
