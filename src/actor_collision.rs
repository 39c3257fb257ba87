use log;

use crate::collision_geometry::resolve_shape_collision;
use crate::models::{CollisionShape, Position};
use crate::shape_gatherer::gather_collision_shapes;
use crate::world_view::WorldView;
use crate::{ACTOR_RADIUS, COLLISION_PASSES};

/// Outcome of running the correction passes over a working set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolution {
    pub position: Position,
    pub corrections: usize, // Number of pushes applied across all passes
    pub settled: bool,      // True if the final pass applied no push
}

/// Corrects a proposed move for the actor `exclude_identity`.
///
/// Shapes are gathered around the actor's current position (from_x, from_y);
/// correction starts at the proposed position (new_x, new_y) and runs a fixed
/// `COLLISION_PASSES` sweeps. Always returns a position; the caller decides
/// whether to commit it.
pub fn resolve_actor_position(
    world: &impl WorldView,
    exclude_identity: &str,
    from_x: f32,
    from_y: f32,
    new_x: f32,
    new_y: f32,
) -> Position {
    let proposed = Position::new(new_x, new_y);
    if !proposed.is_finite() {
        // Undefined input: hand it back untouched rather than guessing a fix
        log::debug!("[ActorCollision] Non-finite proposed position ({}, {}) for {}, skipping resolution",
                   new_x, new_y, exclude_identity);
        return proposed;
    }

    let shapes = gather_collision_shapes(world, exclude_identity, from_x, from_y);
    if shapes.is_empty() {
        return proposed;
    }

    let resolution = resolve_against_shapes(&shapes, proposed, COLLISION_PASSES);
    if resolution.corrections > 0 {
        log::debug!("[ActorCollision] {} moved ({:.1},{:.1}) -> ({:.1},{:.1}) after {} corrections against {} shapes (settled: {})",
                   exclude_identity, new_x, new_y, resolution.position.x, resolution.position.y,
                   resolution.corrections, shapes.len(), resolution.settled);
    }
    resolution.position
}

/// Runs `passes` sweeps over `shapes` starting at `start`. Each push-out feeds
/// the next shape within the same pass.
pub fn resolve_against_shapes(shapes: &[CollisionShape], start: Position, passes: usize) -> CollisionResolution {
    let mut position = start;
    let mut corrections = 0;
    let mut settled = true;

    for _ in 0..passes {
        let mut pushed_this_pass = false;
        for shape in shapes {
            if let Some(corrected) = resolve_shape_collision(position.x, position.y, ACTOR_RADIUS, shape) {
                position = corrected;
                corrections += 1;
                pushed_this_pass = true;
            }
        }
        settled = !pushed_this_pass;
    }

    CollisionResolution { position, corrections, settled }
}

/// True when no shape in `shapes` would push an actor standing at (x, y).
pub fn is_position_clear(shapes: &[CollisionShape], x: f32, y: f32) -> bool {
    shapes.iter().all(|shape| resolve_shape_collision(x, y, ACTOR_RADIUS, shape).is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(x: f32, y: f32, radius: f32) -> CollisionShape {
        CollisionShape::Circle { center_x: x, center_y: y, radius }
    }

    #[test]
    fn clear_start_is_returned_unchanged() {
        let shapes = [circle(0.0, 0.0, 24.0), circle(500.0, 0.0, 24.0)];
        let start = Position::new(200.0, 0.0);
        let resolution = resolve_against_shapes(&shapes, start, COLLISION_PASSES);
        assert_eq!(resolution.position, start);
        assert_eq!(resolution.corrections, 0);
        assert!(resolution.settled);
        assert!(is_position_clear(&shapes, 200.0, 0.0));
    }

    #[test]
    fn zero_passes_is_identity() {
        let shapes = [circle(0.0, 0.0, 24.0)];
        let resolution = resolve_against_shapes(&shapes, Position::new(1.0, 1.0), 0);
        assert_eq!(resolution.position, Position::new(1.0, 1.0));
    }

    #[test]
    fn second_pass_clears_the_first_obstacle_again() {
        // Two circles r=50, 90 apart; actor between them
        let shapes = [circle(0.0, 0.0, 50.0), circle(90.0, 0.0, 50.0)];
        let one_pass = resolve_against_shapes(&shapes, Position::new(45.0, 1.0), 1);
        assert!(!is_position_clear(&shapes, one_pass.position.x, one_pass.position.y));

        let two_pass = resolve_against_shapes(&shapes, Position::new(45.0, 1.0), COLLISION_PASSES);
        assert!(is_position_clear(&shapes, two_pass.position.x, two_pass.position.y));
    }
}
