//! Boundaries to the host: clock, sensor, and actuator.
//!
//! Closures implement each trait, so tests and simple hosts can pass a
//! `|| t` or `|sp: &Setpoint| ...` directly.

use super::setpoint::Setpoint;

/// Monotonic clock in seconds.
pub trait TimeSource {
    /// Current time in seconds.
    fn now(&mut self) -> f64;
}

/// Current sensor reading.
pub trait MeasurementSource {
    /// Latest measured position.
    fn measure(&mut self) -> f64;
}

/// Consumer of setpoints, usually a motor controller.
pub trait SetpointSink {
    /// Apply a setpoint.
    fn apply(&mut self, setpoint: &Setpoint);
}

impl<F: FnMut() -> f64> TimeSource for F {
    #[inline]
    fn now(&mut self) -> f64 {
        self()
    }
}

impl<F: FnMut() -> f64> MeasurementSource for F {
    #[inline]
    fn measure(&mut self) -> f64 {
        self()
    }
}

impl<F: FnMut(&Setpoint)> SetpointSink for F {
    #[inline]
    fn apply(&mut self, setpoint: &Setpoint) {
        self(setpoint)
    }
}
