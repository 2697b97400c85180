//! Per-frame simulation: tree spawning and scrolling, bird motion, scoring
//! and the end-of-session checks.

use super::types::{Bounds, CollisionPolicy, Pipe, Session, TerminationCause};
use rand::Rng;

/// What happened during one simulated frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// A tree was appended this frame.
    pub spawned: bool,
    /// Trees that scrolled past the bird this frame.
    pub scored: u32,
    /// Trees dropped off the left edge this frame.
    pub removed: usize,
    /// Set on the frame the session ends.
    pub ended: Option<TerminationCause>,
}

/// Apply a flap to the session's bird. Ignored once the session is over.
pub fn flap(session: &mut Session) {
    if session.is_over() {
        return;
    }
    session.bird.flap(session.flap_power);
}

/// Run one frame of the session.
pub fn process_tick<R: Rng>(session: &mut Session, rng: &mut R) -> TickEvents {
    let mut events = TickEvents::default();
    if session.is_over() {
        return events;
    }

    events.spawned = spawn_pipe_if_due(session, rng);

    let (scored, removed) = advance_pipes(session);
    events.scored = scored;
    events.removed = removed;

    session
        .bird
        .advance(session.gravity, session.animation_speed);
    session.frame_count += 1;

    if let Some(cause) = check_termination(session) {
        session.result = Some(cause);
        events.ended = Some(cause);
    }

    events
}

/// Whether the stream wants a new tree: it is empty, or the newest tree has
/// scrolled at least `spawn_interval` in from the right edge.
pub fn spawn_due(session: &Session) -> bool {
    match session.pipes.last() {
        None => true,
        Some(last) => last.x <= session.screen.width - session.spawn_interval,
    }
}

/// Append a tree at the right edge when one is due.
pub fn spawn_pipe_if_due<R: Rng>(session: &mut Session, rng: &mut R) -> bool {
    if !spawn_due(session) {
        return false;
    }

    let height = random_pipe_height(
        rng,
        session.screen.height,
        session.min_pipe_height,
        session.metrics.tree.height,
    );
    session.pipes.push(Pipe::new(session.screen.width, height));
    true
}

/// Uniform height in `[min_height, screen_height - sprite_height]`.
///
/// When the sprite is too tall for that range to exist, the lower bound is
/// used (clamped to the surface).
pub fn random_pipe_height<R: Rng>(
    rng: &mut R,
    screen_height: f64,
    min_height: f64,
    sprite_height: f64,
) -> f64 {
    let low = min_height.clamp(0.0, screen_height);
    let high = screen_height - sprite_height;
    if high <= low {
        return low;
    }
    rng.gen_range(low..=high)
}

/// Scroll every tree left, drop those fully past the left edge and score
/// those the bird has cleared.
///
/// The surviving trees are collected into a new vector so removal never
/// disturbs the pass over the others. Returns `(scored, removed)`.
pub fn advance_pipes(session: &mut Session) -> (u32, usize) {
    let speed = session.scroll_speed;
    let width = session.metrics.tree.width;
    let bird_x = session.bird.x;
    let scoring = session.scoring;

    let before = session.pipes.len();
    let mut scored = 0;
    let survivors: Vec<Pipe> = std::mem::take(&mut session.pipes)
        .into_iter()
        .filter_map(|mut pipe| {
            pipe.x -= speed;
            if pipe.x < -width {
                return None;
            }
            if scoring && !pipe.passed && pipe.x + width < bird_x {
                pipe.passed = true;
                scored += 1;
            }
            Some(pipe)
        })
        .collect();

    let removed = before - survivors.len();
    session.pipes = survivors;
    session.score += scored;
    (scored, removed)
}

/// Bird above the top edge or below the bottom edge.
pub fn out_of_bounds(bird_y: f64, screen_height: f64) -> bool {
    bird_y < 0.0 || bird_y > screen_height
}

/// Decide whether the bird hits one tree under `policy`.
pub fn collides(policy: CollisionPolicy, bird: &Bounds, bird_y: f64, pipe: &Bounds) -> bool {
    match policy {
        CollisionPolicy::FullRect => bird.overlaps(pipe),
        CollisionPolicy::Threshold => bird.overlaps_horizontally(pipe) && bird_y > pipe.top(),
    }
}

/// Bounds first, then every tree. Runs whether or not any trees exist.
pub fn check_termination(session: &Session) -> Option<TerminationCause> {
    if out_of_bounds(session.bird.y, session.screen.height) {
        return Some(TerminationCause::OutOfBounds);
    }

    let bird = session.bird_bounds();
    let hit = session.pipes.iter().any(|pipe| {
        collides(
            session.collision,
            &bird,
            session.bird.y,
            &session.pipe_bounds(pipe),
        )
    });

    hit.then_some(TerminationCause::Collision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::types::{Size, SpriteMetrics};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn metrics() -> SpriteMetrics {
        SpriteMetrics {
            bird_frames: vec![Size::new(34.0, 24.0); 3],
            tree: Size::new(80.0, 300.0),
        }
    }

    fn session_with(config: GameConfig) -> Session {
        Session::new(&config, &metrics())
    }

    /// Session with physics switched off so only the trees move.
    fn floating_session(config: GameConfig) -> Session {
        let mut session = session_with(GameConfig {
            gravity: 0.0,
            ..config
        });
        session.bird.y = 100.0;
        session
    }

    #[test]
    fn test_gravity_scenario_ten_frames() {
        let mut session = session_with(GameConfig::default());
        let mut rng = create_test_rng();
        for _ in 0..10 {
            session.pipes.clear();
            process_tick(&mut session, &mut rng);
        }
        assert_eq!(session.bird.velocity, 10.0);
        assert_eq!(session.bird.y, 355.0);
        assert!(session.result.is_none());
    }

    #[test]
    fn test_gravity_then_position_every_frame() {
        let mut session = session_with(GameConfig::default());
        let mut rng = create_test_rng();
        session.bird.velocity = -15.0;
        for _ in 0..20 {
            let (y, v) = (session.bird.y, session.bird.velocity);
            process_tick(&mut session, &mut rng);
            if session.is_over() {
                break;
            }
            assert_eq!(session.bird.velocity, v + 1.0);
            assert_eq!(session.bird.y, y + session.bird.velocity);
        }
    }

    #[test]
    fn test_flap_uses_default_power() {
        let mut session = session_with(GameConfig::default());
        session.bird.velocity = 100.0;
        flap(&mut session);
        assert_eq!(session.bird.velocity, -15.0);
    }

    #[test]
    fn test_flap_ignored_after_session_ends() {
        let mut session = session_with(GameConfig::default());
        session.result = Some(TerminationCause::Collision);
        session.bird.velocity = 4.0;
        flap(&mut session);
        assert_eq!(session.bird.velocity, 4.0);
    }

    #[test]
    fn test_first_tree_spawns_at_right_edge_and_scrolls() {
        let mut session = floating_session(GameConfig::default());
        let mut rng = create_test_rng();

        let events = process_tick(&mut session, &mut rng);
        assert!(events.spawned);
        assert_eq!(session.pipes.len(), 1);
        assert_eq!(session.pipes[0].x, 395.0);

        for n in 2..=40 {
            process_tick(&mut session, &mut rng);
            assert_eq!(session.pipes[0].x, 400.0 - 5.0 * n as f64);
        }
    }

    #[test]
    fn test_tree_removed_once_fully_off_screen() {
        let mut session = floating_session(GameConfig::default());
        session.pipes.push(Pipe::new(-75.0, 150.0));
        let (_, removed) = advance_pipes(&mut session);
        assert_eq!(removed, 0);
        assert_eq!(session.pipes[0].x, -80.0);

        let (_, removed) = advance_pipes(&mut session);
        assert_eq!(removed, 1);
        assert!(session.pipes.is_empty());
    }

    #[test]
    fn test_spawn_spacing_matches_interval() {
        let mut session = floating_session(GameConfig {
            spawn_interval: 100.0,
            ..GameConfig::default()
        });
        let mut rng = create_test_rng();

        let mut spawn_frames = Vec::new();
        for frame in 0..70u64 {
            let before = session.pipes.len();
            let events = process_tick(&mut session, &mut rng);
            if events.spawned {
                spawn_frames.push(frame);
                let newest = session.pipes.len() - 1;
                if newest > 0 && session.pipes.len() > before {
                    let gap = session.pipes[newest].x - session.pipes[newest - 1].x;
                    assert_eq!(gap, 100.0);
                }
            }
        }

        assert!(spawn_frames.len() >= 3);
        for pair in spawn_frames.windows(2) {
            let gap = pair[1] - pair[0];
            assert!((19..=21).contains(&gap), "frame gap {}", gap);
        }
    }

    #[test]
    fn test_no_spawn_until_interval_reached() {
        let mut session = floating_session(GameConfig {
            spawn_interval: 100.0,
            ..GameConfig::default()
        });
        session.pipes.push(Pipe::new(305.0, 150.0));
        assert!(!spawn_due(&session));
        session.pipes[0].x = 300.0;
        assert!(spawn_due(&session));
    }

    #[test]
    fn test_pipe_height_within_range() {
        let mut rng = create_test_rng();
        for _ in 0..500 {
            let h = random_pipe_height(&mut rng, 600.0, 100.0, 300.0);
            assert!((100.0..=300.0).contains(&h));
        }
    }

    #[test]
    fn test_pipe_height_collapses_when_sprite_too_tall() {
        let mut rng = create_test_rng();
        assert_eq!(random_pipe_height(&mut rng, 600.0, 100.0, 550.0), 100.0);
        assert_eq!(random_pipe_height(&mut rng, 600.0, 700.0, 10.0), 600.0);
    }

    #[test]
    fn test_scoring_at_most_once_per_tree() {
        let mut session = floating_session(GameConfig::default());
        // Right edge starts at 55; it clears the bird's center (50) on the second frame.
        session.pipes.push(Pipe::new(-25.0, 150.0));

        let mut flips = 0;
        let mut was_passed = false;
        for _ in 0..10 {
            advance_pipes(&mut session);
            if let Some(pipe) = session.pipes.first() {
                if pipe.passed && !was_passed {
                    flips += 1;
                }
                was_passed = pipe.passed;
            }
        }
        assert_eq!(flips, 1);
        assert_eq!(session.score, 1);
    }

    #[test]
    fn test_scoring_disabled_variant_never_scores() {
        let mut session = floating_session(GameConfig {
            scoring: false,
            ..GameConfig::default()
        });
        session.pipes.push(Pipe::new(-25.0, 150.0));
        for _ in 0..5 {
            advance_pipes(&mut session);
        }
        assert_eq!(session.score, 0);
        assert!(!session.pipes[0].passed);
    }

    #[test]
    fn test_removal_does_not_skip_neighbours() {
        let mut session = floating_session(GameConfig::default());
        session.pipes.push(Pipe::new(-84.0, 150.0));
        session.pipes.push(Pipe::new(-83.0, 150.0));
        session.pipes.push(Pipe::new(10.0, 150.0));
        session.pipes.push(Pipe::new(200.0, 150.0));

        let (_, removed) = advance_pipes(&mut session);
        assert_eq!(removed, 2);
        let xs: Vec<f64> = session.pipes.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![5.0, 195.0]);
    }

    #[test]
    fn test_out_of_bounds_checked_without_trees() {
        let mut session = session_with(GameConfig::default());
        session.bird.y = -1.0;
        assert_eq!(
            check_termination(&session),
            Some(TerminationCause::OutOfBounds)
        );
        session.bird.y = 601.0;
        assert_eq!(
            check_termination(&session),
            Some(TerminationCause::OutOfBounds)
        );
        session.bird.y = 0.0;
        assert_eq!(check_termination(&session), None);
        session.bird.y = 600.0;
        assert_eq!(check_termination(&session), None);
    }

    #[test]
    fn test_out_of_bounds_reported_before_tree_hit() {
        let mut session = session_with(GameConfig::default());
        // Tree spans y 450..750 over the bird's column, so the sprites overlap too.
        session.pipes.push(Pipe::new(30.0, 150.0));
        session.bird.y = 601.0;
        assert!(session.bird_bounds().overlaps(&session.pipe_bounds(&session.pipes[0])));
        assert_eq!(
            check_termination(&session),
            Some(TerminationCause::OutOfBounds)
        );

        session.collision = CollisionPolicy::Threshold;
        assert_eq!(
            check_termination(&session),
            Some(TerminationCause::OutOfBounds)
        );
    }

    #[test]
    fn test_falling_bird_eventually_leaves_surface() {
        let mut session = session_with(GameConfig::default());
        let mut rng = create_test_rng();
        let mut ended = None;
        for _ in 0..200 {
            let events = process_tick(&mut session, &mut rng);
            if events.ended.is_some() {
                ended = events.ended;
                break;
            }
        }
        assert!(ended.is_some());
        assert!(session.is_over());

        // Ended sessions stay frozen.
        let y = session.bird.y;
        let events = process_tick(&mut session, &mut rng);
        assert_eq!(events, TickEvents::default());
        assert_eq!(session.bird.y, y);
    }

    /// (bird, pipe, expected overlap)
    fn overlap_grid() -> Vec<(Bounds, Bounds, bool)> {
        let pipe = Bounds::new(100.0, 100.0, 50.0, 50.0);
        vec![
            // Fully inside
            (Bounds::new(110.0, 110.0, 10.0, 10.0), pipe, true),
            // Separated horizontally
            (Bounds::new(0.0, 110.0, 10.0, 10.0), pipe, false),
            // Separated vertically
            (Bounds::new(110.0, 0.0, 10.0, 10.0), pipe, false),
            // Horizontal overlap only
            (Bounds::new(110.0, 300.0, 10.0, 10.0), pipe, false),
            // Touching left edge
            (Bounds::new(90.0, 110.0, 10.0, 10.0), pipe, false),
            // One unit past left edge
            (Bounds::new(91.0, 110.0, 10.0, 10.0), pipe, true),
            // Touching right edge
            (Bounds::new(150.0, 110.0, 10.0, 10.0), pipe, false),
            // One unit past right edge
            (Bounds::new(149.0, 110.0, 10.0, 10.0), pipe, true),
            // Touching top edge
            (Bounds::new(110.0, 90.0, 10.0, 10.0), pipe, false),
            // One unit past top edge
            (Bounds::new(110.0, 91.0, 10.0, 10.0), pipe, true),
            // Corner to corner
            (Bounds::new(90.0, 90.0, 10.0, 10.0), pipe, false),
            (Bounds::new(91.0, 91.0, 10.0, 10.0), pipe, true),
            // Bird larger than pipe
            (Bounds::new(50.0, 50.0, 200.0, 200.0), pipe, true),
        ]
    }

    #[test]
    fn test_full_rect_overlap_grid() {
        for (i, (bird, pipe, expected)) in overlap_grid().into_iter().enumerate() {
            let bird_y = bird.center().y;
            assert_eq!(
                collides(CollisionPolicy::FullRect, &bird, bird_y, &pipe),
                expected,
                "case {}",
                i
            );
            // Overlap is symmetric.
            assert_eq!(pipe.overlaps(&bird), expected, "case {} (swapped)", i);
        }
    }

    #[test]
    fn test_threshold_policy() {
        let pipe = Bounds::new(100.0, 400.0, 50.0, 300.0);
        let bird_at = |x: f64, y: f64| Bounds::new(x, y - 12.0, 30.0, 24.0);

        // Below the top and over the trunk.
        assert!(collides(
            CollisionPolicy::Threshold,
            &bird_at(110.0, 401.0),
            401.0,
            &pipe
        ));
        // Exactly at the top is not past it.
        assert!(!collides(
            CollisionPolicy::Threshold,
            &bird_at(110.0, 400.0),
            400.0,
            &pipe
        ));
        // Below the top but horizontally clear.
        assert!(!collides(
            CollisionPolicy::Threshold,
            &bird_at(10.0, 500.0),
            500.0,
            &pipe
        ));
        // Sprite grazes the top but the center is above: full-rect hits, threshold does not.
        let grazing = bird_at(110.0, 395.0);
        assert!(collides(CollisionPolicy::FullRect, &grazing, 395.0, &pipe));
        assert!(!collides(CollisionPolicy::Threshold, &grazing, 395.0, &pipe));
    }

    #[test]
    fn test_tree_collision_ends_session() {
        let mut session = session_with(GameConfig::default());
        // Tree top at y=290, spanning the bird's column.
        session.pipes.push(Pipe::new(30.0, 310.0));
        assert_eq!(
            check_termination(&session),
            Some(TerminationCause::Collision)
        );
    }

    #[test]
    fn test_bird_above_tree_is_safe() {
        let mut session = session_with(GameConfig::default());
        session.pipes.push(Pipe::new(30.0, 150.0));
        assert_eq!(check_termination(&session), None);
    }
}
