//! World configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! Unknown keys are rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::world::{EaseRates, Panel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    pub position: [f32; 2],
    /// Radians.
    pub rotation: f32,
    pub scale: [f32; 2],
    pub color: [f32; 4],
    pub speed: EaseRates,
    /// Camera half-height in world units.
    pub view_size: f32,
    /// Camera ease rate while `follow` is on.
    pub follow_rate: f32,
    pub follow: bool,
    pub draw: bool,
    /// A stroke is recorded each frame while the remaining move distance exceeds this.
    pub stroke_threshold: f32,
    pub output: [f32; 4],
    pub output_dim: u8,
    /// Panels visible at startup.
    pub panels: Vec<Panel>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0],
            rotation: 0.0,
            scale: [4.0, 4.0],
            color: [0.0, 1.0, 1.0, 1.0],
            speed: EaseRates::default(),
            view_size: 100.0,
            follow_rate: 0.99,
            follow: false,
            draw: true,
            stroke_threshold: 1.0,
            output: [0.0; 4],
            output_dim: 4,
            panels: vec![Panel::Output],
        }
    }
}

impl WorldConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded world config");
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let rates = [
            ("speed.position", self.speed.position),
            ("speed.rotation", self.speed.rotation),
            ("speed.scale", self.speed.scale),
            ("speed.color", self.speed.color),
            ("follow_rate", self.follow_rate),
        ];
        for (name, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RateOutOfRange { name, value });
            }
        }
        if self.view_size.is_nan() || self.view_size <= 0.0 {
            return Err(ConfigError::InvalidViewSize(self.view_size));
        }
        if self.output_dim > 4 {
            return Err(ConfigError::InvalidOutputDim(self.output_dim));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = WorldConfig::from_json_str("{}").unwrap();
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config =
            WorldConfig::from_json_str(r#"{"speed": {"position": 0.5}, "follow": true}"#).unwrap();
        assert_eq!(config.speed.position, 0.5);
        assert_eq!(config.speed.rotation, 0.25);
        assert!(config.follow);
        assert!(config.draw);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = WorldConfig::from_json_str(r#"{"colour": [1, 1, 1, 1]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_rate_out_of_range() {
        let err = WorldConfig::from_json_str(r#"{"follow_rate": 1.5}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RateOutOfRange { name: "follow_rate", .. }
        ));
    }

    #[test]
    fn test_view_size_must_be_positive() {
        let err = WorldConfig::from_json_str(r#"{"view_size": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidViewSize(_)));
    }

    #[test]
    fn test_panels_by_name() {
        let config = WorldConfig::from_json_str(r#"{"panels": ["help", "speed"]}"#).unwrap();
        assert_eq!(config.panels, vec![Panel::Help, Panel::Speed]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = WorldConfig::load("/nonexistent/steer.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/steer.json"));
    }
}
