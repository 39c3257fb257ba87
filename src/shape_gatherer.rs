use log;

use crate::collision_profiles::collision_profile;
use crate::models::{CollisionShape, ObstacleCategory};
use crate::world_view::{is_blocking_obstacle, WorldView};
use crate::{COLLISION_CULL_DISTANCE_SQUARED, MAX_SHAPES_PER_CATEGORY};

/// What happened to one category during a gather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryGatherStats {
    pub included: usize,
    pub inactive: usize, // Dead, destroyed, respawning, self, flying...
    pub culled: usize,   // Beyond the cull distance
    pub capped: usize,   // In range but over the per-category cap
    pub unavailable: bool,
}

/// Call-scoped bookkeeping for one gather. Created fresh per call so concurrent
/// resolutions never share per-category counters.
#[derive(Debug, Clone)]
pub struct GatherContext {
    max_per_category: usize,
    stats: Vec<(ObstacleCategory, CategoryGatherStats)>,
}

impl Default for GatherContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GatherContext {
    pub fn new() -> Self {
        Self::with_cap(MAX_SHAPES_PER_CATEGORY)
    }

    pub fn with_cap(max_per_category: usize) -> Self {
        Self { max_per_category, stats: Vec::new() }
    }

    /// Stats for a category, all zero if it was never visited.
    pub fn stats(&self, category: ObstacleCategory) -> CategoryGatherStats {
        self.stats
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, s)| *s)
            .unwrap_or_default()
    }

    pub fn total_included(&self) -> usize {
        self.stats.iter().map(|(_, s)| s.included).sum()
    }

    fn begin_category(&mut self, category: ObstacleCategory) -> &mut CategoryGatherStats {
        self.stats.push((category, CategoryGatherStats::default()));
        let last = self.stats.len() - 1;
        &mut self.stats[last].1
    }
}

/// Collects the collision shapes near (query_x, query_y) for the actor `exclude_identity`.
/// The query point is the actor's current position, not the proposed one.
pub fn gather_collision_shapes(
    world: &impl WorldView,
    exclude_identity: &str,
    query_x: f32,
    query_y: f32,
) -> Vec<CollisionShape> {
    let mut context = GatherContext::new();
    gather_collision_shapes_with_context(world, exclude_identity, query_x, query_y, &mut context)
}

/// Same as `gather_collision_shapes`, recording per-category counts into `context`.
pub fn gather_collision_shapes_with_context(
    world: &impl WorldView,
    exclude_identity: &str,
    query_x: f32,
    query_y: f32,
    context: &mut GatherContext,
) -> Vec<CollisionShape> {
    let mut shapes = Vec::new();
    let cap = context.max_per_category;

    for category in ObstacleCategory::ALL {
        // Multi-segment footprints are never collided against here
        let Some(profile) = collision_profile(category) else {
            continue;
        };

        let stats = context.begin_category(category);
        let Some(records) = world.obstacles(category) else {
            log::trace!("[ShapeGatherer] {:?} not available yet, skipping", category);
            stats.unavailable = true;
            continue;
        };

        for record in records {
            if !is_blocking_obstacle(category, record, exclude_identity) {
                stats.inactive += 1;
                continue;
            }

            let (anchor_x, anchor_y) = record.anchor();
            let (center_x, center_y) = profile.center_for(anchor_x, anchor_y);
            let dx = center_x - query_x;
            let dy = center_y - query_y;
            // Negated so a NaN distance (non-finite query point) is culled
            if !(dx * dx + dy * dy <= COLLISION_CULL_DISTANCE_SQUARED) {
                stats.culled += 1;
                continue;
            }

            if stats.included >= cap {
                stats.capped += 1;
                continue;
            }

            shapes.push(profile.shape_at(anchor_x, anchor_y));
            stats.included += 1;
        }

        if stats.capped > 0 {
            log::debug!("[ShapeGatherer] {:?} capped at {} shapes near ({:.1}, {:.1}), {} ignored",
                       category, cap, query_x, query_y, stats.capped);
        }
    }

    shapes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_snapshot::WorldSnapshot;
    use crate::world_view::ObstacleRecord;
    use crate::COLLISION_CULL_DISTANCE;

    fn campfire(id: u64, x: f32, y: f32) -> ObstacleRecord {
        ObstacleRecord::at(id, x, y)
    }

    #[test]
    fn empty_world_gathers_nothing() {
        let snapshot = WorldSnapshot::new();
        let mut context = GatherContext::new();
        let shapes = gather_collision_shapes_with_context(&snapshot, "me", 0.0, 0.0, &mut context);
        assert!(shapes.is_empty());
        assert!(context.stats(ObstacleCategory::Tree).unavailable);
        // Complex footprints are never even visited
        assert_eq!(context.stats(ObstacleCategory::Fence), CategoryGatherStats::default());
    }

    #[test]
    fn cull_uses_offset_center_and_inclusive_threshold() {
        let mut snapshot = WorldSnapshot::new();
        // Campfire has no offset: anchor == center
        snapshot.insert(ObstacleCategory::Campfire, campfire(1, COLLISION_CULL_DISTANCE - 1.0, 0.0));
        snapshot.insert(ObstacleCategory::Campfire, campfire(2, COLLISION_CULL_DISTANCE + 1.0, 0.0));
        // Tree anchor is out of range but its trunk (60px up) is inside
        snapshot.insert(
            ObstacleCategory::Tree,
            ObstacleRecord::at(3, 0.0, COLLISION_CULL_DISTANCE + 50.0).with_health(100.0),
        );

        let mut context = GatherContext::new();
        let shapes = gather_collision_shapes_with_context(&snapshot, "me", 0.0, 0.0, &mut context);
        assert_eq!(shapes.len(), 2);
        assert_eq!(context.stats(ObstacleCategory::Campfire).included, 1);
        assert_eq!(context.stats(ObstacleCategory::Campfire).culled, 1);
        assert_eq!(context.stats(ObstacleCategory::Tree).included, 1);
    }

    #[test]
    fn cap_is_per_category_and_per_call() {
        let mut snapshot = WorldSnapshot::new();
        for i in 0..(MAX_SHAPES_PER_CATEGORY as u64 + 5) {
            snapshot.insert(ObstacleCategory::Campfire, campfire(i, i as f32, 0.0));
        }
        snapshot.insert(ObstacleCategory::RainCollector, campfire(100, 10.0, 10.0));

        let mut context = GatherContext::new();
        let shapes = gather_collision_shapes_with_context(&snapshot, "me", 0.0, 0.0, &mut context);
        assert_eq!(context.stats(ObstacleCategory::Campfire).included, MAX_SHAPES_PER_CATEGORY);
        assert_eq!(context.stats(ObstacleCategory::Campfire).capped, 5);
        assert_eq!(context.stats(ObstacleCategory::RainCollector).included, 1);
        assert_eq!(shapes.len(), MAX_SHAPES_PER_CATEGORY + 1);

        // A second call starts from zero
        let again = gather_collision_shapes(&snapshot, "me", 0.0, 0.0);
        assert_eq!(again.len(), MAX_SHAPES_PER_CATEGORY + 1);
    }

    #[test]
    fn custom_cap_is_respected() {
        let mut snapshot = WorldSnapshot::new();
        for i in 0..10 {
            snapshot.insert(ObstacleCategory::Campfire, campfire(i, 0.0, i as f32));
        }
        let mut context = GatherContext::with_cap(3);
        let shapes = gather_collision_shapes_with_context(&snapshot, "me", 0.0, 0.0, &mut context);
        assert_eq!(shapes.len(), 3);
        assert_eq!(context.total_included(), 3);
    }

    #[test]
    fn non_finite_anchor_is_read_as_origin() {
        let mut snapshot = WorldSnapshot::new();
        snapshot.insert(ObstacleCategory::Campfire, campfire(1, f32::NAN, 100_000.0));

        // (0, 100000) is far out of range
        assert!(gather_collision_shapes(&snapshot, "me", 0.0, 0.0).is_empty());

        snapshot.insert(ObstacleCategory::Campfire, campfire(2, f32::NAN, 10.0));
        let shapes = gather_collision_shapes(&snapshot, "me", 0.0, 0.0);
        assert_eq!(shapes, vec![CollisionShape::Circle { center_x: 0.0, center_y: 10.0, radius: 20.0 }]);
    }

    #[test]
    fn non_finite_query_point_gathers_nothing() {
        let mut snapshot = WorldSnapshot::new();
        snapshot.insert(ObstacleCategory::Campfire, campfire(1, 90_000.0, 90_000.0));
        snapshot.insert(ObstacleCategory::Campfire, campfire(2, 0.0, 0.0));

        let mut context = GatherContext::new();
        let shapes = gather_collision_shapes_with_context(&snapshot, "me", f32::NAN, 0.0, &mut context);
        assert!(shapes.is_empty());
        assert_eq!(context.stats(ObstacleCategory::Campfire).culled, 2);
    }

    #[test]
    fn own_player_record_is_excluded() {
        let mut snapshot = WorldSnapshot::new();
        snapshot.insert(ObstacleCategory::Player, ObstacleRecord::at(0, 5.0, 5.0).with_identity("me"));
        snapshot.insert(ObstacleCategory::Player, ObstacleRecord::at(0, 80.0, 0.0).with_identity("other"));

        let shapes = gather_collision_shapes(&snapshot, "me", 0.0, 0.0);
        assert_eq!(shapes, vec![CollisionShape::Circle { center_x: 80.0, center_y: 0.0, radius: 32.0 }]);
    }
}
