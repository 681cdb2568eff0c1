//! Map configuration, loadable from TOML.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::PROPP_FUNCTION_COUNT;

/// Largest map a configuration may ask for.
pub const MAX_SLOT_COUNT: usize = 1024;
use crate::geometry::{GridLayout, Point};

/// Errors raised while loading a map configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse map config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid map config: {0}")]
    Invalid(String),
}

/// Configuration for one story map.
///
/// ```toml
/// slot_count = 31
///
/// [layout]
/// width = 1200.0
/// cell_width = 110.0
/// cell_height = 140.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Number of slots on the map.
    pub slot_count: usize,

    /// Where the slots sit.
    pub layout: GridLayout,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            slot_count: PROPP_FUNCTION_COUNT,
            layout: GridLayout::default(),
        }
    }
}

impl MapConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: MapConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values a map cannot be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_count == 0 {
            return Err(ConfigError::Invalid("slot_count must be at least 1".into()));
        }
        if self.slot_count > MAX_SLOT_COUNT {
            return Err(ConfigError::Invalid(format!(
                "slot_count must be at most {MAX_SLOT_COUNT}, got {}",
                self.slot_count
            )));
        }

        let layout = &self.layout;
        let sizes = [
            ("width", layout.width),
            ("cell_width", layout.cell_width),
            ("cell_height", layout.cell_height),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "layout.{name} must be a positive number, got {value}"
                )));
            }
        }

        let offsets = [
            ("spacing", layout.spacing),
            ("margin_left", layout.margin_left),
            ("margin_top", layout.margin_top),
        ];
        for (name, value) in offsets {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "layout.{name} must not be negative, got {value}"
                )));
            }
        }

        Ok(())
    }

    /// Slot anchors for this configuration, in slot order.
    pub fn anchors(&self) -> Vec<Point> {
        self.layout.anchors(self.slot_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MapConfig::default();
        assert_eq!(config.slot_count, 31);
        assert!(config.validate().is_ok());
        assert_eq!(config.anchors().len(), 31);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = MapConfig::from_toml_str("").unwrap();
        assert_eq!(config, MapConfig::default());
    }

    #[test]
    fn test_partial_layout_override() {
        let config = MapConfig::from_toml_str(
            r#"
            slot_count = 4

            [layout]
            width = 30.0
            cell_width = 10.0
            "#,
        )
        .unwrap();

        assert_eq!(config.slot_count, 4);
        assert_eq!(config.layout.width, 30.0);
        assert_eq!(config.layout.cell_width, 10.0);
        assert_eq!(config.layout.cell_height, GridLayout::default().cell_height);
    }

    #[test]
    fn test_zero_slots_rejected() {
        let result = MapConfig::from_toml_str("slot_count = 0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_oversized_slot_count_rejected() {
        let result = MapConfig::from_toml_str("slot_count = 9223372036854775807");
        assert!(matches!(result, Err(ConfigError::Invalid(msg)) if msg.contains("at most")));

        let at_limit = format!("slot_count = {MAX_SLOT_COUNT}");
        assert!(MapConfig::from_toml_str(&at_limit).is_ok());
    }

    #[test]
    fn test_negative_cell_rejected() {
        let result = MapConfig::from_toml_str("[layout]\ncell_height = -1.0");
        assert!(matches!(result, Err(ConfigError::Invalid(msg)) if msg.contains("cell_height")));
    }

    #[test]
    fn test_malformed_toml() {
        let result = MapConfig::from_toml_str("slot_count = \"many\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
