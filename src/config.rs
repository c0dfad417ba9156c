//! Configuration loading for vyuha-nav

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

/// Maze geometry and inference tolerances.
///
/// All lengths are millimeters. Defaults describe the competition maze:
/// 1500x2000 mm bounding walls built from 250x80 mm bricks.
#[derive(Clone, Debug, Deserialize)]
pub struct MazeConfig {
    /// Maze extent along X (mm)
    #[serde(default = "defaults::maze_width_mm")]
    pub maze_width_mm: f32,

    /// Maze extent along Y (mm)
    #[serde(default = "defaults::maze_length_mm")]
    pub maze_length_mm: f32,

    /// Long side of a standard maze brick (mm)
    #[serde(default = "defaults::brick_length_mm")]
    pub brick_length_mm: i32,

    /// Short side of a standard maze brick (mm)
    #[serde(default = "defaults::brick_width_mm")]
    pub brick_width_mm: i32,

    /// Robot radius used to mark cells as blocked (mm)
    #[serde(default = "defaults::robot_radius_mm")]
    pub robot_radius_mm: f32,

    /// How close a seen corner must be to a boundary edge to be treated
    /// as part of that boundary wall (mm)
    #[serde(default = "defaults::boundary_tolerance_mm")]
    pub boundary_tolerance_mm: f32,

    /// Range readings beyond this are ignored by the fusion heuristic (mm)
    #[serde(default = "defaults::range_fusion_limit_mm")]
    pub range_fusion_limit_mm: i16,

    /// Measured vs. predicted distances within this agree (mm)
    #[serde(default = "defaults::range_agreement_mm")]
    pub range_agreement_mm: f32,

    /// Observed line lengths within this of a brick side match it (mm)
    #[serde(default = "defaults::line_length_tolerance_mm")]
    pub line_length_tolerance_mm: f32,

    /// Capacity of each sensor denoising queue
    #[serde(default = "defaults::history_capacity")]
    pub history_capacity: usize,

    /// Largest raw reading a range sensor can produce before it is
    /// recorded as invalid (mm)
    #[serde(default = "defaults::sensor_max_valid_mm")]
    pub sensor_max_valid_mm: i16,
}

impl MazeConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: MazeConfig = toml::from_str(&text)?;
        Ok(config)
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            maze_width_mm: defaults::maze_width_mm(),
            maze_length_mm: defaults::maze_length_mm(),
            brick_length_mm: defaults::brick_length_mm(),
            brick_width_mm: defaults::brick_width_mm(),
            robot_radius_mm: defaults::robot_radius_mm(),
            boundary_tolerance_mm: defaults::boundary_tolerance_mm(),
            range_fusion_limit_mm: defaults::range_fusion_limit_mm(),
            range_agreement_mm: defaults::range_agreement_mm(),
            line_length_tolerance_mm: defaults::line_length_tolerance_mm(),
            history_capacity: defaults::history_capacity(),
            sensor_max_valid_mm: defaults::sensor_max_valid_mm(),
        }
    }
}

/// Default value functions for serde deserialization.
mod defaults {
    pub fn maze_width_mm() -> f32 {
        1500.0
    }

    pub fn maze_length_mm() -> f32 {
        2000.0
    }

    pub fn brick_length_mm() -> i32 {
        250
    }

    pub fn brick_width_mm() -> i32 {
        80
    }

    pub fn robot_radius_mm() -> f32 {
        120.0
    }

    pub fn boundary_tolerance_mm() -> f32 {
        150.0
    }

    pub fn range_fusion_limit_mm() -> i16 {
        400
    }

    pub fn range_agreement_mm() -> f32 {
        20.0
    }

    pub fn line_length_tolerance_mm() -> f32 {
        40.0
    }

    pub fn history_capacity() -> usize {
        10
    }

    pub fn sensor_max_valid_mm() -> i16 {
        600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MazeConfig::default();
        assert_eq!(config.maze_width_mm, 1500.0);
        assert_eq!(config.maze_length_mm, 2000.0);
        assert_eq!(config.brick_length_mm, 250);
        assert_eq!(config.brick_width_mm, 80);
        assert_eq!(config.robot_radius_mm, 120.0);
        assert_eq!(config.history_capacity, 10);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: MazeConfig = toml::from_str("maze_width_mm = 3000.0").unwrap();
        assert_eq!(config.maze_width_mm, 3000.0);
        assert_eq!(config.maze_length_mm, 2000.0);
        assert_eq!(config.brick_width_mm, 80);
    }
}
