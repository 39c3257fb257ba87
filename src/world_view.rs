use serde::{Serialize, Deserialize};

use crate::models::ObstacleCategory;

/// Read-only record of one world entity, reduced to the fields collision needs.
/// Every field has a fallback so partially synced rows never stop resolution:
/// a missing or non-finite position reads as the world origin, missing health as dead.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ObstacleRecord {
    pub id: u64,
    pub identity: Option<String>, // Only set for players
    pub pos_x: Option<f32>,
    pub pos_y: Option<f32>,
    pub health: Option<f32>,
    pub is_destroyed: bool,
    pub is_respawning: bool, // Depleted resource waiting for its respawn_at
    pub is_dead: bool,
    pub is_flying: bool, // Birds in flight pass over everything
    pub is_backpack: bool, // Dropped backpacks are storage boxes you can walk over
    pub is_online: Option<bool>,
    pub is_ward: bool, // Regular lanterns have no collision, wards do
    pub is_active: Option<bool>, // ALK stations; missing reads as active
}

impl ObstacleRecord {
    pub fn at(id: u64, pos_x: f32, pos_y: f32) -> Self {
        Self {
            id,
            pos_x: Some(pos_x),
            pos_y: Some(pos_y),
            ..Default::default()
        }
    }

    pub fn with_health(mut self, health: f32) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    pub fn anchor(&self) -> (f32, f32) {
        let coordinate = |value: Option<f32>| value.filter(|v| v.is_finite()).unwrap_or(0.0);
        (coordinate(self.pos_x), coordinate(self.pos_y))
    }

    fn has_health(&self) -> bool {
        self.health.map_or(false, |h| h > 0.0)
    }
}

/// Source of world state the gatherer reads from. Implemented by whatever keeps
/// the local subscription cache; this crate never mutates what it returns.
pub trait WorldView {
    /// Current records for `category`, or None when that category is not
    /// available yet (e.g. subscription not established).
    fn obstacles(&self, category: ObstacleCategory) -> Option<&[ObstacleRecord]>;
}

impl<T: WorldView + ?Sized> WorldView for &T {
    fn obstacles(&self, category: ObstacleCategory) -> Option<&[ObstacleRecord]> {
        (**self).obstacles(category)
    }
}

/// Liveness and exclusion policy: does this record block the actor `exclude_identity`?
pub fn is_blocking_obstacle(category: ObstacleCategory, record: &ObstacleRecord, exclude_identity: &str) -> bool {
    match category {
        // Resources disappear at zero health and stay gone until respawn
        ObstacleCategory::Tree | ObstacleCategory::Stone | ObstacleCategory::Barrel => {
            record.has_health() && !record.is_respawning
        }
        // Dropped backpacks are walk-over containers
        ObstacleCategory::WoodenStorageBox => !record.is_destroyed && !record.is_backpack,
        ObstacleCategory::RuneStone
        | ObstacleCategory::Cairn
        | ObstacleCategory::BasaltColumn
        | ObstacleCategory::Campfire
        | ObstacleCategory::Furnace
        | ObstacleCategory::RainCollector
        | ObstacleCategory::HomesteadHearth
        | ObstacleCategory::Shelter
        | ObstacleCategory::SeaStack
        | ObstacleCategory::Turret => !record.is_destroyed,
        ObstacleCategory::Lantern => !record.is_destroyed && record.is_ward,
        ObstacleCategory::AlkStation => !record.is_destroyed && record.is_active.unwrap_or(true),
        ObstacleCategory::Player => {
            if record.identity.as_deref() == Some(exclude_identity) {
                return false;
            }
            if record.is_dead || record.health.map_or(false, |h| h <= 0.0) {
                return false;
            }
            record.is_online.unwrap_or(true)
        }
        ObstacleCategory::WildAnimal => record.has_health() && !record.is_flying,
        ObstacleCategory::WallCell | ObstacleCategory::Fence | ObstacleCategory::CompoundBuilding => false,
    }
}
