use crate::models::{CollisionShape, Position};
use crate::{COLLISION_EPSILON, COLLISION_SEPARATION_MARGIN};

/// Pushes a circular actor out of a circular obstacle.
/// Returns None when the actor does not penetrate the obstacle.
pub fn resolve_circle_collision(
    actor_x: f32,
    actor_y: f32,
    actor_radius: f32,
    center_x: f32,
    center_y: f32,
    radius: f32,
) -> Option<Position> {
    let min_dist = actor_radius + radius;
    let dx = actor_x - center_x;
    let dy = actor_y - center_y;
    let dist_sq = dx * dx + dy * dy;
    if dist_sq >= min_dist * min_dist {
        return None;
    }

    let dist = dist_sq.sqrt();
    if dist < COLLISION_EPSILON {
        // Centers coincide: no normal, push along +x
        return Some(Position::new(actor_x + min_dist, actor_y));
    }

    let push = (min_dist - dist) + COLLISION_SEPARATION_MARGIN;
    Some(Position::new(actor_x + (dx / dist) * push, actor_y + (dy / dist) * push))
}

/// Pushes a circular actor out of an axis-aligned box.
/// Returns None when the actor does not penetrate the box.
pub fn resolve_aabb_collision(
    actor_x: f32,
    actor_y: f32,
    actor_radius: f32,
    center_x: f32,
    center_y: f32,
    half_width: f32,
    half_height: f32,
) -> Option<Position> {
    let left = center_x - half_width;
    let right = center_x + half_width;
    let top = center_y - half_height;
    let bottom = center_y + half_height;

    // Broad phase against the box grown by the actor radius
    if actor_x < left - actor_radius
        || actor_x > right + actor_radius
        || actor_y < top - actor_radius
        || actor_y > bottom + actor_radius
    {
        return None;
    }

    let closest_x = actor_x.max(left).min(right);
    let closest_y = actor_y.max(top).min(bottom);
    let dx = actor_x - closest_x;
    let dy = actor_y - closest_y;
    let dist_sq = dx * dx + dy * dy;
    if dist_sq >= actor_radius * actor_radius {
        return None;
    }

    let dist = dist_sq.sqrt();
    if dist < COLLISION_EPSILON {
        // Actor center is inside the box: leave through the nearest edge
        let clearance = actor_radius + COLLISION_SEPARATION_MARGIN;
        let to_left = actor_x - left;
        let to_right = right - actor_x;
        let to_top = actor_y - top;
        let to_bottom = bottom - actor_y;
        let nearest = to_left.min(to_right).min(to_top).min(to_bottom);

        return Some(if nearest == to_left {
            Position::new(left - clearance, actor_y)
        } else if nearest == to_right {
            Position::new(right + clearance, actor_y)
        } else if nearest == to_top {
            Position::new(actor_x, top - clearance)
        } else {
            Position::new(actor_x, bottom + clearance)
        });
    }

    let push = (actor_radius - dist) + COLLISION_SEPARATION_MARGIN;
    Some(Position::new(actor_x + (dx / dist) * push, actor_y + (dy / dist) * push))
}

/// Dispatches to the resolver matching the shape kind.
pub fn resolve_shape_collision(actor_x: f32, actor_y: f32, actor_radius: f32, shape: &CollisionShape) -> Option<Position> {
    match *shape {
        CollisionShape::Circle { center_x, center_y, radius } => {
            resolve_circle_collision(actor_x, actor_y, actor_radius, center_x, center_y, radius)
        }
        CollisionShape::Aabb { center_x, center_y, half_width, half_height } => {
            resolve_aabb_collision(actor_x, actor_y, actor_radius, center_x, center_y, half_width, half_height)
        }
    }
}
