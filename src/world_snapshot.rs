use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::models::ObstacleCategory;
use crate::world_view::{ObstacleRecord, WorldView};

/// Owned, in-memory copy of the world rows an agent has cached locally.
/// Categories that were never set read as unavailable. Serialized in category order.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct WorldSnapshot {
    #[serde(default)]
    categories: BTreeMap<ObstacleCategory, Vec<ObstacleRecord>>,
}

impl WorldSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a snapshot of the form `{"categories": {"Tree": [{...}], ...}}`.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse world snapshot: {}", e))
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to serialize world snapshot: {}", e))
    }

    /// Appends a record, making the category available if it was not.
    pub fn insert(&mut self, category: ObstacleCategory, record: ObstacleRecord) {
        self.categories.entry(category).or_default().push(record);
    }

    /// Replaces every record of a category (an empty list is "available, no rows").
    pub fn set_category(&mut self, category: ObstacleCategory, records: Vec<ObstacleRecord>) {
        self.categories.insert(category, records);
    }

    pub fn mark_unavailable(&mut self, category: ObstacleCategory) {
        self.categories.remove(&category);
    }

    pub fn is_available(&self, category: ObstacleCategory) -> bool {
        self.categories.contains_key(&category)
    }
}

impl WorldView for WorldSnapshot {
    fn obstacles(&self, category: ObstacleCategory) -> Option<&[ObstacleRecord]> {
        self.categories.get(&category).map(|records| records.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_categories_are_unavailable() {
        let mut snapshot = WorldSnapshot::new();
        assert!(snapshot.obstacles(ObstacleCategory::Tree).is_none());

        snapshot.set_category(ObstacleCategory::Tree, Vec::new());
        assert_eq!(snapshot.obstacles(ObstacleCategory::Tree).map(|r| r.len()), Some(0));

        snapshot.mark_unavailable(ObstacleCategory::Tree);
        assert!(!snapshot.is_available(ObstacleCategory::Tree));
    }

    #[test]
    fn parses_partial_rows() {
        let json = r#"{"categories": {"Stone": [{"id": 4, "pos_x": 10.0}]}}"#;
        let snapshot = WorldSnapshot::from_json(json).unwrap();
        let stones = snapshot.obstacles(ObstacleCategory::Stone).unwrap();
        assert_eq!(stones.len(), 1);
        assert_eq!(stones[0].id, 4);
        assert_eq!(stones[0].pos_y, None);
        assert_eq!(stones[0].health, None);
    }

    #[test]
    fn serializes_categories_in_a_stable_order() {
        let mut snapshot = WorldSnapshot::new();
        snapshot.insert(ObstacleCategory::WildAnimal, ObstacleRecord::at(3, 0.0, 0.0));
        snapshot.insert(ObstacleCategory::Stone, ObstacleRecord::at(2, 0.0, 0.0));
        snapshot.insert(ObstacleCategory::Tree, ObstacleRecord::at(1, 0.0, 0.0));

        let json = snapshot.to_json().unwrap();
        let tree = json.find("\"Tree\"").unwrap();
        let stone = json.find("\"Stone\"").unwrap();
        let animal = json.find("\"WildAnimal\"").unwrap();
        assert!(tree < stone && stone < animal, "{}", json);

        let mut reordered = WorldSnapshot::new();
        reordered.insert(ObstacleCategory::Tree, ObstacleRecord::at(1, 0.0, 0.0));
        reordered.insert(ObstacleCategory::WildAnimal, ObstacleRecord::at(3, 0.0, 0.0));
        reordered.insert(ObstacleCategory::Stone, ObstacleRecord::at(2, 0.0, 0.0));
        assert_eq!(reordered.to_json().unwrap(), json);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = WorldSnapshot::from_json("{not json").unwrap_err();
        assert!(err.starts_with("Failed to parse world snapshot"));
    }
}
