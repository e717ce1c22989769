//! Closed scalar intervals for output clamping and input wraparound.

use serde::Deserialize;

use crate::error::{ControlError, Result};
use crate::math::{abs, sign};

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds {
    /// Lower end.
    pub min: f64,
    /// Upper end.
    pub max: f64,
}

impl Bounds {
    /// Create an interval.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Interval `[-limit, limit]`.
    pub fn symmetric(limit: f64) -> Self {
        Self::new(-limit, limit)
    }

    /// Width of the interval.
    #[inline]
    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    /// Check if `value` lies inside the interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp `value` into the interval.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Take the short way around a cyclic range of this width.
    ///
    /// Differences larger than half the range are shifted by one full range.
    pub fn wrap(&self, difference: f64) -> f64 {
        let size = self.size();
        if abs(difference) > size / 2.0 {
            difference - sign(difference) * size
        } else {
            difference
        }
    }

    /// Check that the interval is usable as an output clamp.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::InvalidBounds` if either end is NaN or
    /// `min > max`.
    pub fn validate_output(&self) -> Result<()> {
        if self.min.is_nan() || self.max.is_nan() || self.min > self.max {
            return Err(ControlError::InvalidBounds {
                min: self.min,
                max: self.max,
            }
            .into());
        }
        Ok(())
    }

    /// Check that the interval is usable as a cyclic input range.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::InvalidInputRange` unless both ends are finite
    /// and `min < max`.
    pub fn validate_range(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(ControlError::InvalidInputRange {
                min: self.min,
                max: self.max,
            }
            .into());
        }
        Ok(())
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::symmetric(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_and_contains() {
        let b = Bounds::new(-1.0, 2.0);

        assert_eq!(b.size(), 3.0);
        assert_eq!(b.clamp(5.0), 2.0);
        assert_eq!(b.clamp(-5.0), -1.0);
        assert!(b.contains(0.0));
        assert!(!b.contains(2.5));
    }

    #[test]
    fn test_wrap_takes_short_way() {
        let range = Bounds::new(10.0, 370.0);

        assert_eq!(range.wrap(260.0), -100.0);
        assert_eq!(range.wrap(-260.0), 100.0);
        assert_eq!(range.wrap(170.0), 170.0);
    }

    #[test]
    fn test_validation() {
        assert!(Bounds::new(-1.0, 1.0).validate_output().is_ok());
        assert!(Bounds::new(1.0, 1.0).validate_output().is_ok());
        assert!(Bounds::new(1.0, -1.0).validate_output().is_err());
        assert!(Bounds::new(1.0, 1.0).validate_range().is_err());
        assert!(Bounds::new(0.0, f64::INFINITY).validate_range().is_err());
    }
}
