//! PID controller with feedforward.
//!
//! One controller covers both the fixed-period and the per-call-time
//! variants: [`PidController::calculate`] advances by the configured period,
//! [`PidController::calculate_at`] takes the time from the caller.

use crate::config::PidConfig;
use crate::error::{ControlError, Result};
use crate::motion::Setpoint;

use super::gains::Gains;

/// Mutable loop state, present once the controller is initialized.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PidState {
    integral: f64,
    previous_input: f64,
    previous_error: f64,
    previous_time: f64,
    previous_derivative: f64,
}

/// Scalar feedback + feedforward controller.
///
/// Output is `kf·position + kv·velocity + ka·acceleration` plus
/// `kp·error + integral + kd·derivative`, always clamped into the
/// configured output bounds. The integral term is unwound only when it is
/// itself pushing the output past a bound.
#[derive(Debug, Clone)]
pub struct PidController {
    config: PidConfig,
    state: Option<PidState>,
}

impl PidController {
    /// Create a controller.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(config: PidConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: None,
        })
    }

    /// The controller configuration.
    #[inline]
    pub fn config(&self) -> &PidConfig {
        &self.config
    }

    /// The gains in use.
    #[inline]
    pub fn gains(&self) -> &Gains {
        &self.config.gains
    }

    /// Check if `initialize` has been called.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Current integral term, once initialized.
    #[inline]
    pub fn integral_term(&self) -> Option<f64> {
        self.state.map(|s| s.integral)
    }

    /// Start (or restart) control at time zero.
    ///
    /// See [`initialize_at`](Self::initialize_at).
    pub fn initialize(&mut self, input: f64, current_output: f64) {
        self.initialize_at(input, 0.0, current_output);
    }

    /// Start (or restart) control at `time`.
    ///
    /// The integral term is seeded with `current_output` so the first
    /// output continues from whatever is already applied.
    pub fn initialize_at(&mut self, input: f64, time: f64, current_output: f64) {
        self.state = Some(PidState {
            integral: current_output,
            previous_input: input,
            previous_error: 0.0,
            previous_time: time,
            previous_derivative: 0.0,
        });
    }

    /// Fixed-period update toward `setpoint`.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::NoFixedPeriod` if no period is configured and
    /// `ControlError::NotInitialized` before `initialize`.
    pub fn calculate(&mut self, input: f64, setpoint: &Setpoint) -> Result<f64> {
        let period = self.config.period_secs.ok_or(ControlError::NoFixedPeriod)?;
        let state = self.state.ok_or(ControlError::NotInitialized)?;
        let time = state.previous_time + period;
        self.calculate_at(input, setpoint, time)
    }

    /// Update toward `setpoint` with the caller's clock.
    pub fn calculate_at(&mut self, input: f64, setpoint: &Setpoint, time: f64) -> Result<f64> {
        self.calculate_raw_at(
            input,
            setpoint.position,
            setpoint.velocity,
            setpoint.acceleration,
            time,
        )
    }

    /// Update toward a raw target with the caller's clock.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::NotInitialized` before `initialize`.
    pub fn calculate_raw_at(
        &mut self,
        input: f64,
        position: f64,
        velocity: f64,
        acceleration: f64,
        time: f64,
    ) -> Result<f64> {
        let mut state = self.state.ok_or(ControlError::NotInitialized)?;
        let gains = self.config.gains;
        let bounds = self.config.output_bounds;

        let error = self.wrap(position - input);
        let dt = time - state.previous_time;
        if dt < 0.0 {
            warn!("controller time went backwards by {}s", -dt);
        }

        state.integral += gains.ki * error * dt.max(0.0);

        let derivative = if dt <= 0.0 {
            state.previous_derivative
        } else if self.config.derivative_on_input {
            -self.wrap(input - state.previous_input) / dt
        } else {
            (error - state.previous_error) / dt
        };

        let feedback = gains.kp * error + state.integral + gains.kd * derivative;
        let feedforward = gains.kf * position + gains.kv * velocity + gains.ka * acceleration;
        let output = feedforward + feedback;

        if output > bounds.max && state.integral > bounds.max {
            trace!("unwinding integral {} by {}", state.integral, output - bounds.max);
            state.integral -= output - bounds.max;
        } else if output < bounds.min && state.integral < bounds.min {
            trace!("unwinding integral {} by {}", state.integral, output - bounds.min);
            state.integral -= output - bounds.min;
        }
        state.integral = bounds.clamp(state.integral);

        state.previous_input = input;
        state.previous_error = error;
        state.previous_time = time;
        state.previous_derivative = derivative;
        self.state = Some(state);

        Ok(bounds.clamp(output))
    }

    fn wrap(&self, difference: f64) -> f64 {
        match self.config.input_range {
            Some(range) => range.wrap(difference),
            None => difference,
        }
    }
}
