//! Named point-to-point moves from TOML.

use heapless::String;
use serde::Deserialize;

use crate::error::{ConfigError, Result};

use super::axis::AxisConfig;
use super::constraints::ProfileConstraints;

/// A named move of one axis to an absolute position.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveConfig {
    /// Axis name (must match an axis in config).
    pub axis: String<32>,

    /// Target position (absolute from origin).
    pub target: f64,

    /// Velocity as percentage of the axis maximum (1-200).
    #[serde(default = "default_percent")]
    pub velocity_percent: u8,

    /// Acceleration and deceleration as percentage of the axis maximum (1-200).
    #[serde(default = "default_percent")]
    pub acceleration_percent: u8,
}

fn default_percent() -> u8 {
    100
}

impl MoveConfig {
    /// Limits for this move on `axis`.
    pub fn constraints(&self, axis: &AxisConfig) -> ProfileConstraints {
        axis.constraints()
            .scaled(self.velocity_percent, self.acceleration_percent)
    }

    /// Check that both percentages are within 1-200.
    pub fn check_percents(&self) -> Result<()> {
        for percent in [self.velocity_percent, self.acceleration_percent] {
            if percent == 0 || percent > 200 {
                return Err(ConfigError::InvalidPercent(percent).into());
            }
        }
        Ok(())
    }
}
