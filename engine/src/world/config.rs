//! World configuration.
//!
//! One sub-config per component, all loadable from a (partial) JSON
//! document. Missing fields keep their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::camera::FollowConfig;
use crate::player::PlayerPhysics;
use crate::terrain::TerrainConfig;
use crate::weather::{LightningConfig, RainConfig};

use super::water::WaterConfig;

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Every tunable of a world.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub terrain: TerrainConfig,
    pub rain: RainConfig,
    pub lightning: LightningConfig,
    pub water: WaterConfig,
    pub player: PlayerPhysics,
    pub camera: FollowConfig,
}

impl WorldConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.terrain;
        positive("terrain.frequency_divisor", t.frequency_divisor)?;
        finite("terrain.amplitude", t.amplitude)?;
        positive("terrain.size", t.size)?;
        finite("terrain.ray_origin_height", t.ray_origin_height)?;
        if t.segments == 0 {
            return Err(invalid("terrain.segments", "must be at least 1"));
        }

        let r = &self.rain;
        if r.particle_count == 0 {
            return Err(invalid("rain.particle_count", "must be at least 1"));
        }
        non_negative("rain.half_extent", r.half_extent)?;
        probability("rain.spawn_chance", r.spawn_chance)?;
        positive("rain.bias_ceiling", r.bias_ceiling)?;
        range("rain.fall_speed", r.min_fall_speed, r.max_fall_speed)?;
        range("rain.respawn_height", r.min_respawn_height, r.max_respawn_height)?;
        range("rain.initial_height", r.min_initial_height, r.max_initial_height)?;
        finite("rain.lower_bound", r.lower_bound)?;
        finite("rain.parked_height", r.parked_height)?;

        let l = &self.lightning;
        probability("lightning.spawn_probability", l.spawn_probability)?;
        non_negative("lightning.half_extent", l.half_extent)?;
        range("lightning.height", l.min_height, l.max_height)?;
        range("lightning.duration", l.min_duration, l.max_duration)?;
        positive("lightning.min_duration", l.min_duration)?;
        range("lightning.peak_intensity", l.min_peak_intensity, l.max_peak_intensity)?;
        unit_interval("lightning.attack_fraction", l.attack_fraction)?;
        if l.attack_fraction >= 1.0 {
            return Err(invalid("lightning.attack_fraction", "must be below 1"));
        }
        finite("lightning.ambient_scale", l.ambient_scale)?;
        if let Some(step) = l.fixed_step {
            positive("lightning.fixed_step", step)?;
        }

        let w = &self.water;
        positive("water.tile_size", w.tile_size)?;
        positive("water.grid_size", w.grid_size)?;
        unit_interval("water.percentile", w.percentile)?;
        probability("water.fill_probability", w.fill_probability)?;
        finite("water.surface_offset", w.surface_offset)?;

        let p = &self.player;
        finite("player.move_speed", p.move_speed)?;
        lerp_factor("player.turn_lerp", p.turn_lerp)?;
        non_negative("player.turn_snap", p.turn_snap)?;
        finite("player.gravity", p.gravity)?;
        if p.gravity >= 0.0 {
            return Err(invalid("player.gravity", "must be negative"));
        }
        finite("player.terminal_velocity", p.terminal_velocity)?;
        if p.terminal_velocity > 0.0 {
            return Err(invalid("player.terminal_velocity", "must not be above zero"));
        }
        finite("player.jump_velocity", p.jump_velocity)?;
        non_negative("player.step_down", p.step_down)?;
        positive("player.max_delta", p.max_delta)?;
        if !p.spawn_position.is_finite() {
            return Err(invalid("player.spawn_position", "must be finite"));
        }

        let c = &self.camera;
        lerp_factor("camera.position_lerp", c.position_lerp)?;
        non_negative("camera.manual_override_secs", c.manual_override_secs)?;

        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be finite"))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be positive"))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must not be negative"))
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, "must be within [0, 1]"))
    }
}

/// Half-open `(0, 1]`.
fn unit_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be within (0, 1]"))
    }
}

fn lerp_factor(field: &'static str, value: f64) -> Result<(), ConfigError> {
    unit_interval(field, value)
}

fn range(field: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    finite(field, min)?;
    finite(field, max)?;
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("min {min} exceeds max {max}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = WorldConfig::from_json_str(r#"{ "rain": { "particle_count": 500 } }"#)
            .expect("partial config should parse");

        assert_eq!(config.rain.particle_count, 500);
        assert_eq!(config.rain.spawn_chance, 0.6);
        assert_eq!(config.terrain, TerrainConfig::default());
        assert_eq!(config.lightning.fixed_step, Some(0.016));
    }

    #[test]
    fn test_measured_lightning_step() {
        let config = WorldConfig::from_json_str(r#"{ "lightning": { "fixed_step": null } }"#)
            .expect("null step should parse");
        assert_eq!(config.lightning.fixed_step, None);
    }

    #[test]
    fn test_json_round_trip() {
        let config = WorldConfig::default();
        let json = config.to_json_string().expect("serialize");
        let back = WorldConfig::from_json_str(&json).expect("parse");
        assert_eq!(back, config);
    }

    #[test]
    fn test_malformed_json() {
        let result = WorldConfig::from_json_str("{ rain: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_probability_above_one() {
        let mut config = WorldConfig::default();
        config.water.fill_probability = 1.5;
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "water.fill_probability"),
            other => panic!("expected invalid field, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_inverted_range() {
        let mut config = WorldConfig::default();
        config.lightning.min_duration = 0.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "lightning.duration", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_percentile_and_segments() {
        let mut config = WorldConfig::default();
        config.water.percentile = 0.0;
        assert!(config.validate().is_err());

        let mut config = WorldConfig::default();
        config.terrain.segments = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_upward_gravity() {
        let mut config = WorldConfig::default();
        config.player.gravity = 9.81;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_step_down() {
        let mut config = WorldConfig::default();
        config.player.step_down = -0.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "player.step_down", .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = WorldConfig::from_json_file("/nonexistent/storm_valley.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
