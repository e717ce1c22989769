//! Feedback and feedforward gain constants.

use serde::Deserialize;

use crate::error::{ControlError, Result};

/// Gains for a PIDF controller.
///
/// Feedback uses `kp`, `ki` and `kd`. Feedforward uses `kf` (position),
/// `kv` (velocity) and `ka` (acceleration). Missing gains deserialize as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct Gains {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
    /// Position feedforward gain.
    pub kf: f64,
    /// Velocity feedforward gain.
    pub kv: f64,
    /// Acceleration feedforward gain.
    pub ka: f64,
}

impl Gains {
    /// Create a full gain set.
    pub const fn new(kp: f64, ki: f64, kd: f64, kf: f64, kv: f64, ka: f64) -> Self {
        Self {
            kp,
            ki,
            kd,
            kf,
            kv,
            ka,
        }
    }

    /// Feedback-only gains.
    pub const fn pid(kp: f64, ki: f64, kd: f64) -> Self {
        Self::new(kp, ki, kd, 0.0, 0.0, 0.0)
    }

    /// Replace the feedforward gains.
    pub fn with_feedforward(mut self, kf: f64, kv: f64, ka: f64) -> Self {
        self.kf = kf;
        self.kv = kv;
        self.ka = ka;
        self
    }

    /// Check that every gain is finite.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::InvalidGain` naming the first bad gain.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("kp", self.kp),
            ("ki", self.ki),
            ("kd", self.kd),
            ("kf", self.kf),
            ("kv", self.kv),
            ("ka", self.ka),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(ControlError::InvalidGain { name, value }.into());
            }
        }
        Ok(())
    }
}
