//! Take-back-half velocity controller.
//!
//! Integrates error into the output and, each time the error changes sign,
//! replaces the output with the average of itself and the output recorded at
//! the previous crossing. Suits plants such as flywheels whose dynamics are
//! not well characterized.

use crate::config::TakeBackHalfConfig;
use crate::error::Result;

use super::bounds::Bounds;

/// Model-free adaptive controller.
#[derive(Debug, Clone)]
pub struct TakeBackHalf {
    gain: f64,
    output_bounds: Bounds,
    output: f64,
    previous_error: f64,
    /// Output recorded at the last zero crossing.
    snapshot: f64,
}

impl TakeBackHalf {
    /// Create a controller with output clamped to `[-output_limit, output_limit]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `gain` is not finite or `output_limit` is not
    /// finite and positive.
    pub fn new(gain: f64, output_limit: f64) -> Result<Self> {
        Self::from_config(&TakeBackHalfConfig { gain, output_limit })
    }

    /// Create a controller from configuration.
    pub fn from_config(config: &TakeBackHalfConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            gain: config.gain,
            output_bounds: Bounds::symmetric(config.output_limit),
            output: 0.0,
            previous_error: 0.0,
            snapshot: 0.0,
        })
    }

    /// Restart from `current_output`, which also becomes the crossing
    /// snapshot.
    ///
    /// No measurement is needed: the stored error is cleared, so the first
    /// [`calculate`](Self::calculate) after a restart only integrates and
    /// never counts as a zero crossing. A call written as
    /// `initialize(input, current_output)` for other controllers maps to
    /// `initialize(current_output)` here.
    pub fn initialize(&mut self, current_output: f64) {
        self.output = self.output_bounds.clamp(current_output);
        self.snapshot = self.output;
        self.previous_error = 0.0;
    }

    /// Last output.
    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    /// Advance one update toward `setpoint`.
    pub fn calculate(&mut self, input: f64, setpoint: f64) -> f64 {
        let error = setpoint - input;
        let mut output = self.output + error * self.gain;

        if error * self.previous_error < 0.0 {
            output = 0.5 * (output + self.snapshot);
            trace!("error crossed zero, taking back half to {}", output);
            self.snapshot = output;
        }

        self.output = self.output_bounds.clamp(output);
        self.previous_error = error;
        self.output
    }
}
