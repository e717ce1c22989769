//! Controller and executor configuration from TOML.

use serde::Deserialize;

use crate::control::{Bounds, Gains};
use crate::error::{ConfigError, ControlError, Result};

/// PID/PIDF controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PidConfig {
    /// Feedback and feedforward gains.
    #[serde(default)]
    pub gains: Gains,

    /// Output is always clamped into these bounds.
    #[serde(default)]
    pub output_bounds: Bounds,

    /// Cyclic input range; when set, error takes the short way around.
    #[serde(default)]
    pub input_range: Option<Bounds>,

    /// Differentiate the measurement instead of the error.
    #[serde(default)]
    pub derivative_on_input: bool,

    /// Fixed control period in seconds, for fixed-period updates.
    #[serde(default)]
    pub period_secs: Option<f64>,
}

impl PidConfig {
    /// Create a configuration with the given gains and output bounds.
    pub fn new(gains: Gains, output_bounds: Bounds) -> Self {
        Self {
            gains,
            output_bounds,
            input_range: None,
            derivative_on_input: false,
            period_secs: None,
        }
    }

    /// Wrap error around a cyclic input range.
    pub fn continuous(mut self, range: Bounds) -> Self {
        self.input_range = Some(range);
        self
    }

    /// Differentiate the measurement instead of the error.
    pub fn with_derivative_on_input(mut self) -> Self {
        self.derivative_on_input = true;
        self
    }

    /// Set the fixed control period in seconds.
    pub fn with_period(mut self, period_secs: f64) -> Self {
        self.period_secs = Some(period_secs);
        self
    }

    /// Check if error wraps around a cyclic range.
    #[inline]
    pub fn is_continuous(&self) -> bool {
        self.input_range.is_some()
    }

    /// Validate gains, bounds, range and period.
    pub fn validate(&self) -> Result<()> {
        self.gains.validate()?;
        self.output_bounds.validate_output()?;
        if let Some(range) = self.input_range {
            range.validate_range()?;
        }
        if let Some(period) = self.period_secs {
            if !period.is_finite() || period <= 0.0 {
                return Err(ControlError::InvalidPeriod(period).into());
            }
        }
        Ok(())
    }
}

/// Take-back-half controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TakeBackHalfConfig {
    /// Output change per unit of error per update.
    pub gain: f64,

    /// Output is clamped into `[-output_limit, output_limit]`.
    #[serde(default = "default_output_limit")]
    pub output_limit: f64,
}

fn default_output_limit() -> f64 {
    1.0
}

impl TakeBackHalfConfig {
    /// Validate gain and output limit.
    pub fn validate(&self) -> Result<()> {
        if !self.gain.is_finite() {
            return Err(ControlError::InvalidGain {
                name: "gain",
                value: self.gain,
            }
            .into());
        }
        if self.output_limit <= 0.0 || !self.output_limit.is_finite() {
            return Err(ControlError::InvalidBounds {
                min: -self.output_limit,
                max: self.output_limit,
            }
            .into());
        }
        Ok(())
    }
}

/// Profile executor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ExecutorConfig {
    /// Distance from the final target that counts as arrived.
    #[serde(default)]
    pub allowable_error: f64,

    /// Step length for clock-free stepping, in seconds.
    #[serde(default = "default_step_period")]
    pub step_period_secs: f64,
}

fn default_step_period() -> f64 {
    crate::motion::DEFAULT_STEP_PERIOD
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            allowable_error: 0.0,
            step_period_secs: default_step_period(),
        }
    }
}

impl ExecutorConfig {
    /// Validate tolerance and step period.
    pub fn validate(&self) -> Result<()> {
        if self.allowable_error.is_nan() || self.allowable_error < 0.0 {
            return Err(ConfigError::InvalidAllowableError(self.allowable_error).into());
        }
        check_step_period(self.step_period_secs)
    }
}

/// Check that a fixed step length is finite and positive.
pub(crate) fn check_step_period(step_period: f64) -> Result<()> {
    if !step_period.is_finite() || step_period <= 0.0 {
        return Err(ConfigError::InvalidStepPeriod(step_period).into());
    }
    Ok(())
}
