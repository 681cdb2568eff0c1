//! Saved story files: the story's title plus its map snapshot.

use serde::{Deserialize, Serialize};

use super::Snapshot;
use crate::error::{MapError, SnapshotError};
use crate::placement::StoryMap;

/// Everything written to disk when a story is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDocument {
    pub title: String,
    pub map: Snapshot,
}

impl StoryDocument {
    pub fn new(title: impl Into<String>, map: Snapshot) -> Self {
        Self {
            title: title.into(),
            map,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl StoryMap {
    /// Capture this map into a document with the given title.
    pub fn save_document(&self, title: impl Into<String>) -> StoryDocument {
        StoryDocument::new(title, self.capture())
    }

    /// Restore this map from a saved document and return the story's title.
    pub fn load_document(&mut self, document: &StoryDocument) -> Result<String, MapError> {
        self.restore(&document.map)?;
        Ok(document.title.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_cards::{Card, Point};

    fn small_map() -> StoryMap {
        StoryMap::with_anchors((0..3).map(|i| Point::new(10.0 * i as f64, 0.0)))
    }

    #[test]
    fn test_save_and_load() {
        let mut map = small_map();
        map.drop_card(Card::new(4), Point::new(20.0, 0.0)).unwrap();

        let json = map.save_document("The Firebird").to_json_pretty().unwrap();

        let mut reopened = small_map();
        let document = StoryDocument::from_json(&json).unwrap();
        let title = reopened.load_document(&document).unwrap();

        assert_eq!(title, "The Firebird");
        assert_eq!(reopened.capture(), map.capture());
    }

    #[test]
    fn test_document_for_wrong_map_size() {
        let document = StoryDocument::new("Too big", Snapshot::new(vec![None; 31]));
        let mut map = small_map();

        assert!(matches!(
            map.load_document(&document),
            Err(MapError::InvalidSnapshot(SnapshotError::LengthMismatch { .. }))
        ));
    }

    #[test]
    fn test_document_json_embeds_versioned_map() {
        let document = StoryDocument::new("Untitled", Snapshot::new(vec![None, None]));
        let value: serde_json::Value =
            serde_json::from_str(&document.to_json_pretty().unwrap()).unwrap();

        assert_eq!(value["title"], "Untitled");
        assert_eq!(value["map"]["version"], "v1");
        assert_eq!(value["map"]["slots"], serde_json::json!([null, null]));
    }
}
