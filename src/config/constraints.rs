//! Kinematic limits for profile planning.

use serde::Deserialize;

use crate::error::{ProfileError, Result};

/// Velocity and acceleration limits for one axis.
///
/// Deceleration falls back to acceleration when not given (symmetric
/// profile).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProfileConstraints {
    /// Maximum speed in units per second.
    pub max_velocity: f64,

    /// Maximum rate of speeding up in units per second squared.
    pub max_acceleration: f64,

    /// Maximum rate of slowing down in units per second squared.
    #[serde(default)]
    pub max_deceleration: Option<f64>,
}

impl ProfileConstraints {
    /// Create asymmetric constraints.
    pub const fn new(max_velocity: f64, max_acceleration: f64, max_deceleration: f64) -> Self {
        Self {
            max_velocity,
            max_acceleration,
            max_deceleration: Some(max_deceleration),
        }
    }

    /// Create constraints with equal acceleration and deceleration.
    pub const fn symmetric(max_velocity: f64, max_acceleration: f64) -> Self {
        Self {
            max_velocity,
            max_acceleration,
            max_deceleration: None,
        }
    }

    /// Effective deceleration limit.
    #[inline]
    pub fn deceleration(&self) -> f64 {
        self.max_deceleration.unwrap_or(self.max_acceleration)
    }

    /// Check if acceleration and deceleration differ.
    pub fn is_asymmetric(&self) -> bool {
        self.max_deceleration
            .map(|d| d != self.max_acceleration)
            .unwrap_or(false)
    }

    /// Scale velocity and both acceleration limits by percentages of this
    /// axis' maximum.
    pub fn scaled(&self, velocity_percent: u8, acceleration_percent: u8) -> Self {
        let v = velocity_percent as f64 / 100.0;
        let a = acceleration_percent as f64 / 100.0;
        Self {
            max_velocity: self.max_velocity * v,
            max_acceleration: self.max_acceleration * a,
            max_deceleration: self.max_deceleration.map(|d| d * a),
        }
    }

    /// Check that every limit is finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::InvalidConstraint` naming the first bad limit.
    pub fn validate(&self) -> Result<()> {
        check_positive("max_velocity", self.max_velocity)?;
        check_positive("max_acceleration", self.max_acceleration)?;
        check_positive("max_deceleration", self.deceleration())?;
        Ok(())
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ProfileError::InvalidConstraint { name, value }.into());
    }
    Ok(())
}
