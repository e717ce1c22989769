//! Cumulative-bias controller for additive corrections.

use crate::config::PidConfig;
use crate::error::Result;
use crate::motion::Setpoint;

use super::pid::PidController;

/// Wraps a [`PidController`] and sums its outputs into a running bias.
///
/// Each update returns the bias so far rather than the instantaneous
/// controller output, for callers that add a correction on top of an
/// existing command.
#[derive(Debug, Clone)]
pub struct SteeringController {
    pid: PidController,
    bias: f64,
}

impl SteeringController {
    /// Create a steering controller.
    pub fn new(config: PidConfig) -> Result<Self> {
        Ok(Self {
            pid: PidController::new(config)?,
            bias: 0.0,
        })
    }

    /// Restart control at `time` with zero bias.
    pub fn initialize(&mut self, input: f64, time: f64) {
        self.bias = 0.0;
        self.pid.initialize_at(input, time, 0.0);
    }

    /// Accumulated bias.
    #[inline]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// The wrapped controller.
    #[inline]
    pub fn controller(&self) -> &PidController {
        &self.pid
    }

    /// Add this update's controller output to the bias and return the bias.
    pub fn calculate_at(&mut self, input: f64, setpoint: &Setpoint, time: f64) -> Result<f64> {
        self.bias += self.pid.calculate_at(input, setpoint, time)?;
        Ok(self.bias)
    }
}
