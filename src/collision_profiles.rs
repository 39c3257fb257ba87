/******************************************************************************
 *                                                                            *
 * Per-category collision footprints. Each obstacle stores a bottom-anchored  *
 * position; the profile offset moves that anchor to the collision center.    *
 * Multi-segment structures (walls, fences, compound buildings) have no       *
 * profile and are never collided against here.                               *
 *                                                                            *
 ******************************************************************************/

use std::collections::HashMap;
use lazy_static::lazy_static;
use serde::{Serialize, Deserialize};

use crate::models::{CollisionShape, ObstacleCategory};
use crate::ACTOR_RADIUS;

// --- Footprint Constants ---
// Values mirror the server/client collision constants of each entity module.
pub(crate) const TREE_TRUNK_RADIUS: f32 = 24.0;
pub(crate) const TREE_COLLISION_Y_OFFSET: f32 = 60.0; // Trunk sits above the sprite anchor
pub(crate) const STONE_RADIUS: f32 = 40.0;
pub(crate) const STONE_COLLISION_Y_OFFSET: f32 = 50.0;
pub(crate) const BARREL_COLLISION_RADIUS: f32 = 25.0; // Tighter than the sprite for better accuracy
pub(crate) const BARREL_COLLISION_Y_OFFSET: f32 = 48.0; // Visual center
pub(crate) const RUNE_STONE_AABB_HALF_WIDTH: f32 = 55.0; // 110px wide base
pub(crate) const RUNE_STONE_AABB_HALF_HEIGHT: f32 = 24.0; // 48px tall base
pub(crate) const RUNE_STONE_COLLISION_Y_OFFSET: f32 = 24.0;
pub(crate) const CAIRN_RADIUS: f32 = 30.0;
pub(crate) const CAIRN_COLLISION_Y_OFFSET: f32 = 20.0;
pub(crate) const BASALT_COLUMN_RADIUS: f32 = 35.0;
pub(crate) const BASALT_COLUMN_COLLISION_Y_OFFSET: f32 = 40.0;
pub(crate) const BOX_COLLISION_RADIUS: f32 = 18.0;
pub(crate) const BOX_COLLISION_Y_OFFSET: f32 = 52.0; // Matches the placement offset
pub(crate) const CAMPFIRE_COLLISION_RADIUS: f32 = 20.0;
pub(crate) const FURNACE_COLLISION_RADIUS: f32 = 35.0;
pub(crate) const FURNACE_COLLISION_Y_OFFSET: f32 = -35.0; // Collision center sits below pos_y
pub(crate) const RAIN_COLLECTOR_COLLISION_RADIUS: f32 = 30.0;
pub(crate) const HEARTH_COLLISION_RADIUS: f32 = 55.0; // Slightly smaller than the 125x125 visual
pub(crate) const HEARTH_COLLISION_Y_OFFSET: f32 = 72.5;
pub(crate) const SHELTER_AABB_HALF_WIDTH: f32 = 300.0 / 2.0;
pub(crate) const SHELTER_AABB_HALF_HEIGHT: f32 = 125.0 / 2.0;
pub(crate) const SHELTER_AABB_CENTER_Y_OFFSET_FROM_POS_Y: f32 = 200.0;
pub(crate) const SEA_STACK_AABB_HALF_WIDTH: f32 = 60.0; // Base (scale 1.0) footprint
pub(crate) const SEA_STACK_AABB_HALF_HEIGHT: f32 = 25.0;
pub(crate) const SEA_STACK_COLLISION_Y_OFFSET: f32 = 40.0;
pub(crate) const ALK_STATION_AABB_HALF_WIDTH: f32 = 350.0 / 2.0;
pub(crate) const ALK_STATION_AABB_HALF_HEIGHT: f32 = (480.0 / 3.0) / 2.0; // Bottom third of the building
pub(crate) const WARD_COLLISION_RADIUS: f32 = 40.0; // Wards are larger than regular lanterns
pub(crate) const WARD_COLLISION_Y_OFFSET: f32 = 80.0;
pub(crate) const TURRET_COLLISION_RADIUS: f32 = 50.0;
pub(crate) const WILD_ANIMAL_COLLISION_RADIUS: f32 = 32.0;

/// Footprint kind and size for one obstacle category.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum ProfileShape {
    Circle { radius: f32 },
    Aabb { half_width: f32, half_height: f32 },
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub struct CollisionProfile {
    pub shape: ProfileShape,
    /// Added to the stored anchor to get the collision center.
    pub offset_x: f32,
    pub offset_y: f32,
}

impl CollisionProfile {
    const fn circle(radius: f32, offset_y: f32) -> Self {
        Self { shape: ProfileShape::Circle { radius }, offset_x: 0.0, offset_y }
    }

    const fn aabb(half_width: f32, half_height: f32, offset_y: f32) -> Self {
        Self { shape: ProfileShape::Aabb { half_width, half_height }, offset_x: 0.0, offset_y }
    }

    /// Collision center for an obstacle anchored at (anchor_x, anchor_y).
    pub fn center_for(&self, anchor_x: f32, anchor_y: f32) -> (f32, f32) {
        (anchor_x + self.offset_x, anchor_y + self.offset_y)
    }

    /// Builds the collision shape for an obstacle anchored at (anchor_x, anchor_y).
    pub fn shape_at(&self, anchor_x: f32, anchor_y: f32) -> CollisionShape {
        let (center_x, center_y) = self.center_for(anchor_x, anchor_y);
        match self.shape {
            ProfileShape::Circle { radius } => CollisionShape::Circle { center_x, center_y, radius },
            ProfileShape::Aabb { half_width, half_height } => CollisionShape::Aabb {
                center_x,
                center_y,
                half_width,
                half_height,
            },
        }
    }
}

// --- Collision Profile Table ---

lazy_static! {
    pub static ref COLLISION_PROFILES: HashMap<ObstacleCategory, CollisionProfile> = {
        let mut profiles = HashMap::new();

        // Resources
        profiles.insert(ObstacleCategory::Tree, CollisionProfile::circle(TREE_TRUNK_RADIUS, -TREE_COLLISION_Y_OFFSET));
        profiles.insert(ObstacleCategory::Stone, CollisionProfile::circle(STONE_RADIUS, -STONE_COLLISION_Y_OFFSET));
        profiles.insert(ObstacleCategory::Barrel, CollisionProfile::circle(BARREL_COLLISION_RADIUS, -BARREL_COLLISION_Y_OFFSET));

        // Monuments
        profiles.insert(ObstacleCategory::RuneStone, CollisionProfile::aabb(
            RUNE_STONE_AABB_HALF_WIDTH,
            RUNE_STONE_AABB_HALF_HEIGHT,
            -RUNE_STONE_COLLISION_Y_OFFSET,
        ));
        profiles.insert(ObstacleCategory::Cairn, CollisionProfile::circle(CAIRN_RADIUS, -CAIRN_COLLISION_Y_OFFSET));
        profiles.insert(ObstacleCategory::BasaltColumn, CollisionProfile::circle(BASALT_COLUMN_RADIUS, -BASALT_COLUMN_COLLISION_Y_OFFSET));
        profiles.insert(ObstacleCategory::SeaStack, CollisionProfile::aabb(
            SEA_STACK_AABB_HALF_WIDTH,
            SEA_STACK_AABB_HALF_HEIGHT,
            -SEA_STACK_COLLISION_Y_OFFSET,
        ));
        // Box sits on the sprite bottom: center is one half-height above the anchor
        profiles.insert(ObstacleCategory::AlkStation, CollisionProfile::aabb(
            ALK_STATION_AABB_HALF_WIDTH,
            ALK_STATION_AABB_HALF_HEIGHT,
            -ALK_STATION_AABB_HALF_HEIGHT,
        ));

        // Placeables
        profiles.insert(ObstacleCategory::WoodenStorageBox, CollisionProfile::circle(BOX_COLLISION_RADIUS, -BOX_COLLISION_Y_OFFSET));
        profiles.insert(ObstacleCategory::Campfire, CollisionProfile::circle(CAMPFIRE_COLLISION_RADIUS, 0.0));
        profiles.insert(ObstacleCategory::Furnace, CollisionProfile::circle(FURNACE_COLLISION_RADIUS, -FURNACE_COLLISION_Y_OFFSET));
        profiles.insert(ObstacleCategory::RainCollector, CollisionProfile::circle(RAIN_COLLECTOR_COLLISION_RADIUS, 0.0));
        profiles.insert(ObstacleCategory::HomesteadHearth, CollisionProfile::circle(HEARTH_COLLISION_RADIUS, -HEARTH_COLLISION_Y_OFFSET));
        profiles.insert(ObstacleCategory::Shelter, CollisionProfile::aabb(
            SHELTER_AABB_HALF_WIDTH,
            SHELTER_AABB_HALF_HEIGHT,
            -SHELTER_AABB_CENTER_Y_OFFSET_FROM_POS_Y,
        ));
        profiles.insert(ObstacleCategory::Lantern, CollisionProfile::circle(WARD_COLLISION_RADIUS, -WARD_COLLISION_Y_OFFSET));
        profiles.insert(ObstacleCategory::Turret, CollisionProfile::circle(TURRET_COLLISION_RADIUS, 0.0));

        // Other actors
        profiles.insert(ObstacleCategory::Player, CollisionProfile::circle(ACTOR_RADIUS, 0.0));
        profiles.insert(ObstacleCategory::WildAnimal, CollisionProfile::circle(WILD_ANIMAL_COLLISION_RADIUS, 0.0));

        profiles
    };
}

/// Returns the profile for `category`, or None for complex footprints.
pub fn collision_profile(category: ObstacleCategory) -> Option<&'static CollisionProfile> {
    COLLISION_PROFILES.get(&category)
}

/// Checks the table against the category list: every primitive category has a
/// usable profile, complex ones have none.
pub fn validate_collision_profiles() -> Result<(), String> {
    for category in ObstacleCategory::ALL {
        let profile = COLLISION_PROFILES.get(&category);
        if category.has_complex_footprint() {
            if profile.is_some() {
                return Err(format!("Complex footprint {:?} must not have a collision profile.", category));
            }
            continue;
        }

        let profile = profile.ok_or_else(|| format!("Missing collision profile for {:?}.", category))?;
        let dimensions_ok = match profile.shape {
            ProfileShape::Circle { radius } => radius.is_finite() && radius > 0.0,
            ProfileShape::Aabb { half_width, half_height } => {
                half_width.is_finite() && half_width > 0.0 && half_height.is_finite() && half_height > 0.0
            }
        };
        if !dimensions_ok {
            return Err(format!("Collision profile for {:?} has invalid dimensions: {:?}", category, profile.shape));
        }
        if !profile.offset_x.is_finite() || !profile.offset_y.is_finite() {
            return Err(format!("Collision profile for {:?} has a non-finite offset.", category));
        }
    }
    Ok(())
}
