//! Profile segments.

use crate::error::{ProfileError, Result};
use crate::math::{abs, EPSILON};

use super::setpoint::Setpoint;
use super::transition::Transition;

/// One constant-acceleration segment of a motion profile.
///
/// Velocity, curvature and heading each follow a linear [`Transition`]
/// over the same duration. `distance` is always the exact integral of the
/// velocity ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Chunk {
    distance: f64,
    acceleration: f64,
    duration: f64,
    velocity: Transition,
    curvature: Transition,
    heading: Transition,
}

impl Chunk {
    /// Segment covering `distance` while velocity ramps `v0 -> v1`,
    /// curvature `k0 -> k1` and heading `h0 -> h1`.
    ///
    /// # Errors
    ///
    /// Fails when the average velocity is zero or disagrees in sign with
    /// `distance`.
    pub fn velocity_distance(
        distance: f64,
        v0: f64,
        v1: f64,
        k0: f64,
        k1: f64,
        h0: f64,
        h1: f64,
    ) -> Result<Self> {
        let average = 0.5 * (v0 + v1);
        if abs(average) < EPSILON {
            return Err(ProfileError::ZeroVelocitySegment.into());
        }

        let duration = checked_duration(distance / average)?;
        let velocity = Transition::new(v0, v1, duration);

        Ok(Self {
            distance,
            acceleration: velocity.rate(),
            duration,
            velocity,
            curvature: Transition::new(k0, k1, duration),
            heading: Transition::new(h0, h1, duration),
        })
    }

    /// Cruise segment holding `velocity` over `distance`.
    ///
    /// # Errors
    ///
    /// Fails when `velocity` is zero or disagrees in sign with `distance`.
    pub fn constant_velocity(velocity: f64, distance: f64) -> Result<Self> {
        if abs(velocity) < EPSILON {
            return Err(ProfileError::ZeroVelocitySegment.into());
        }

        let duration = checked_duration(distance / velocity)?;

        Ok(Self::from_velocity(
            Transition::constant(velocity, duration),
            distance,
        ))
    }

    /// Ramp from `v0` to `v1`, using `max_accel` when speeding up and
    /// `max_decel` when slowing down.
    pub fn velocity_transition(v0: f64, v1: f64, max_accel: f64, max_decel: f64) -> Self {
        let rate = if abs(v1) > abs(v0) {
            max_accel
        } else {
            max_decel
        };
        let duration = abs(v1 - v0) / rate;
        let distance = 0.5 * (v0 + v1) * duration;

        Self::from_velocity(Transition::new(v0, v1, duration), distance)
    }

    fn from_velocity(velocity: Transition, distance: f64) -> Self {
        let duration = velocity.duration();
        Self {
            distance,
            acceleration: velocity.rate(),
            duration,
            velocity,
            curvature: Transition::zero(duration),
            heading: Transition::zero(duration),
        }
    }

    /// Signed distance covered.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Segment length in seconds.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Constant acceleration over the segment.
    #[inline]
    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    /// Velocity at the start of the segment.
    #[inline]
    pub fn start_velocity(&self) -> f64 {
        self.velocity.start()
    }

    /// Velocity at the end of the segment.
    #[inline]
    pub fn end_velocity(&self) -> f64 {
        self.velocity.end()
    }

    /// Velocity `t` seconds into the segment.
    pub fn velocity(&self, t: f64) -> f64 {
        self.velocity.get(t)
    }

    /// Distance covered `t` seconds into the segment.
    pub fn position(&self, t: f64) -> f64 {
        self.velocity.integrate(t)
    }

    /// Setpoint `t` seconds into the segment, relative to its start.
    pub fn setpoint(&self, t: f64) -> Setpoint {
        Setpoint::new(
            self.velocity.integrate(t),
            self.velocity.get(t),
            self.acceleration,
            self.curvature.get(t),
            self.heading.get(t),
        )
    }
}

fn checked_duration(duration: f64) -> Result<f64> {
    if duration < 0.0 || !duration.is_finite() {
        return Err(ProfileError::NegativeDuration { duration }.into());
    }
    Ok(duration)
}
