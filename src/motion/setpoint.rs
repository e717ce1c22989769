//! Kinematic setpoint snapshot.

use core::ops::Neg;

/// Desired kinematic state at one instant.
///
/// Produced fresh by every profile query; never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Setpoint {
    /// Position.
    pub position: f64,
    /// Velocity.
    pub velocity: f64,
    /// Acceleration.
    pub acceleration: f64,
    /// Path curvature.
    pub curvature: f64,
    /// Path heading.
    pub heading: f64,
}

impl Setpoint {
    /// Create a setpoint from all five components.
    pub const fn new(
        position: f64,
        velocity: f64,
        acceleration: f64,
        curvature: f64,
        heading: f64,
    ) -> Self {
        Self {
            position,
            velocity,
            acceleration,
            curvature,
            heading,
        }
    }

    /// Hold `position` at rest.
    pub const fn terminal(position: f64) -> Self {
        Self::new(position, 0.0, 0.0, 0.0, 0.0)
    }

    /// Map an angular setpoint (radians) onto a circle of `radius`.
    ///
    /// Position, velocity and acceleration become arc length and its
    /// derivatives; curvature and heading are carried over unchanged.
    pub fn to_arc_length(&self, radius: f64) -> Self {
        Self {
            position: self.position * radius,
            velocity: self.velocity * radius,
            acceleration: self.acceleration * radius,
            curvature: self.curvature,
            heading: self.heading,
        }
    }

    /// Mirror the setpoint through the origin.
    pub fn negate(&self) -> Self {
        Self {
            position: -self.position,
            velocity: -self.velocity,
            acceleration: -self.acceleration,
            curvature: -self.curvature,
            heading: -self.heading,
        }
    }
}

impl Neg for Setpoint {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}
