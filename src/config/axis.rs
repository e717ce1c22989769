//! Axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::constraints::ProfileConstraints;
use super::controller::{ExecutorConfig, PidConfig, TakeBackHalfConfig};

/// Complete configuration for one controlled axis.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Maximum speed in units per second.
    pub max_velocity: f64,

    /// Maximum rate of speeding up in units per second squared.
    pub max_acceleration: f64,

    /// Maximum rate of slowing down; defaults to `max_acceleration`.
    #[serde(default)]
    pub max_deceleration: Option<f64>,

    /// Optional PID/PIDF position loop.
    #[serde(default)]
    pub pid: Option<PidConfig>,

    /// Optional take-back-half velocity loop.
    #[serde(default)]
    pub take_back_half: Option<TakeBackHalfConfig>,

    /// Profile executor settings.
    #[serde(default)]
    pub executor: ExecutorConfig,
}

impl AxisConfig {
    /// Kinematic limits of this axis.
    pub fn constraints(&self) -> ProfileConstraints {
        ProfileConstraints {
            max_velocity: self.max_velocity,
            max_acceleration: self.max_acceleration,
            max_deceleration: self.max_deceleration,
        }
    }
}
