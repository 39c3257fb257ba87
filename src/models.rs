use serde::{Serialize, Deserialize};

/// A point in world pixel coordinates.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared_to(&self, x: f32, y: f32) -> f32 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f32, f32)> for Position {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Enum to differentiate between the world entity categories that may block movement.
/// Order of `ALL` is the gathering order and must not depend on anything at runtime.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObstacleCategory {
    // Harvestable resources (respawn after depletion)
    Tree,
    Stone,
    Barrel,
    // Static monuments
    RuneStone,
    Cairn,
    BasaltColumn,
    SeaStack,
    AlkStation,
    // Player-placed structures
    WoodenStorageBox,
    Campfire,
    Furnace,
    RainCollector,
    HomesteadHearth,
    Shelter,
    Lantern, // Only wards block
    Turret,
    // Dynamic actors
    Player,
    WildAnimal,
    // Multi-segment footprints - never gathered (no collision profile)
    WallCell,
    Fence,
    CompoundBuilding,
}

impl ObstacleCategory {
    pub const ALL: [ObstacleCategory; 21] = [
        ObstacleCategory::Tree,
        ObstacleCategory::Stone,
        ObstacleCategory::Barrel,
        ObstacleCategory::RuneStone,
        ObstacleCategory::Cairn,
        ObstacleCategory::BasaltColumn,
        ObstacleCategory::SeaStack,
        ObstacleCategory::AlkStation,
        ObstacleCategory::WoodenStorageBox,
        ObstacleCategory::Campfire,
        ObstacleCategory::Furnace,
        ObstacleCategory::RainCollector,
        ObstacleCategory::HomesteadHearth,
        ObstacleCategory::Shelter,
        ObstacleCategory::Lantern,
        ObstacleCategory::Turret,
        ObstacleCategory::Player,
        ObstacleCategory::WildAnimal,
        ObstacleCategory::WallCell,
        ObstacleCategory::Fence,
        ObstacleCategory::CompoundBuilding,
    ];

    /// Categories whose footprint is not a single circle or box.
    pub fn has_complex_footprint(&self) -> bool {
        matches!(
            self,
            ObstacleCategory::WallCell | ObstacleCategory::Fence | ObstacleCategory::CompoundBuilding
        )
    }
}

/// Collision geometry snapshot built fresh for every resolution call.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum CollisionShape {
    Circle {
        center_x: f32,
        center_y: f32,
        radius: f32,
    },
    Aabb {
        center_x: f32,
        center_y: f32,
        half_width: f32,
        half_height: f32,
    },
}

impl CollisionShape {
    pub fn center(&self) -> Position {
        match *self {
            CollisionShape::Circle { center_x, center_y, .. } => Position::new(center_x, center_y),
            CollisionShape::Aabb { center_x, center_y, .. } => Position::new(center_x, center_y),
        }
    }
}
