//! Local collision resolution for movement authorities (browser clients and
//! autonomous agents). The world simulation does not enforce actor-vs-obstacle
//! collision, so every producer of actor positions runs this before it commits
//! a move.

// Declare modules
mod models;
mod collision_profiles;
mod world_view;
mod world_snapshot;
mod shape_gatherer;
mod collision_geometry;
mod actor_collision;

pub use models::{CollisionShape, ObstacleCategory, Position};
pub use collision_profiles::{
    collision_profile, validate_collision_profiles, CollisionProfile, ProfileShape,
    COLLISION_PROFILES,
};
pub use world_view::{is_blocking_obstacle, ObstacleRecord, WorldView};
pub use world_snapshot::WorldSnapshot;
pub use shape_gatherer::{
    gather_collision_shapes, gather_collision_shapes_with_context, CategoryGatherStats,
    GatherContext,
};
pub use collision_geometry::{
    resolve_aabb_collision, resolve_circle_collision, resolve_shape_collision,
};
pub use actor_collision::{
    is_position_clear, resolve_actor_position, resolve_against_shapes, CollisionResolution,
};

// --- Global Constants ---
// NOTE: These must stay numerically identical to the client-side collision code.
pub const ACTOR_RADIUS: f32 = 32.0; // Actor collision radius (same as player radius)

// Only obstacles whose collision center lies within this distance of the actor's
// current position are considered in a resolution call
pub const COLLISION_CULL_DISTANCE: f32 = 250.0;
pub const COLLISION_CULL_DISTANCE_SQUARED: f32 = COLLISION_CULL_DISTANCE * COLLISION_CULL_DISTANCE;

// Upper bound on shapes taken from a single category per call (dense forests, bases)
pub const MAX_SHAPES_PER_CATEGORY: usize = 16;

// Number of sweeps over the gathered shapes. Two is enough for the common
// "pushed out of one obstacle into another" case.
pub const COLLISION_PASSES: usize = 2;

// Extra distance added on every push-out so the actor ends strictly outside
pub const COLLISION_SEPARATION_MARGIN: f32 = 1.0;

// Below this distance two points are treated as coincident (no usable normal)
pub const COLLISION_EPSILON: f32 = 0.001;
