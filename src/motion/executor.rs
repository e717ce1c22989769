//! Per-tick profile execution.

use crate::config::{check_step_period, ExecutorConfig};
use crate::error::{ExecutorError, Result};
use crate::math::abs;

use super::profile::Profile;
use super::setpoint::Setpoint;
use super::sources::{MeasurementSource, SetpointSink, TimeSource};

/// Default step length for [`StaticProfileExecutor::update_no_end`].
pub const DEFAULT_STEP_PERIOD: f64 = 0.020;

/// Streams a profile's setpoints to a sink against a wall clock.
///
/// Generic over:
/// - `CLOCK`: time source in seconds
/// - `SINK`: receiver of each sampled setpoint
/// - `SENSOR`: measured position used for the completion test
#[derive(Debug)]
pub struct ProfileExecutor<CLOCK, SINK, SENSOR>
where
    CLOCK: TimeSource,
    SINK: SetpointSink,
    SENSOR: MeasurementSource,
{
    /// The profile being executed.
    profile: Profile,

    clock: CLOCK,
    sink: SINK,
    sensor: SENSOR,

    /// Completion tolerance around the final position.
    allowable_error: f64,

    /// Where the profile ends, cached at construction.
    final_target: f64,

    /// Clock reading at `initialize`.
    start_time: Option<f64>,
}

impl<CLOCK, SINK, SENSOR> ProfileExecutor<CLOCK, SINK, SENSOR>
where
    CLOCK: TimeSource,
    SINK: SetpointSink,
    SENSOR: MeasurementSource,
{
    /// Create a new executor for a profile.
    pub fn new(
        mut profile: Profile,
        clock: CLOCK,
        sink: SINK,
        sensor: SENSOR,
        allowable_error: f64,
    ) -> Self {
        let final_target = profile.position(profile.duration());
        profile.reset();

        Self {
            profile,
            clock,
            sink,
            sensor,
            allowable_error,
            final_target,
            start_time: None,
        }
    }

    /// Create an executor using the tolerance from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn from_config(
        profile: Profile,
        clock: CLOCK,
        sink: SINK,
        sensor: SENSOR,
        config: &ExecutorConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(profile, clock, sink, sensor, config.allowable_error))
    }

    /// Record the start time and rewind the profile.
    pub fn initialize(&mut self) {
        let now = self.clock.now();
        self.profile.reset();
        self.start_time = Some(now);

        debug!(
            "executing profile to {} over {}s",
            self.final_target,
            self.profile.duration()
        );
    }

    /// Check if `initialize` has been called.
    #[inline]
    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    /// Seconds since `initialize`.
    ///
    /// # Errors
    ///
    /// Returns `ExecutorError::NotStarted` before `initialize`.
    pub fn elapsed(&mut self) -> Result<f64> {
        let start = self.start_time.ok_or(ExecutorError::NotStarted)?;
        Ok(self.clock.now() - start)
    }

    /// Sample the profile at the elapsed time and forward the setpoint.
    ///
    /// Returns `true` once the measured position is within the allowable
    /// error of the final target.
    pub fn update(&mut self) -> Result<bool> {
        let t = self.elapsed()?;
        self.apply_at(t);

        let measured = self.sensor.measure();
        let done = abs(self.final_target - measured) <= self.allowable_error;
        if done {
            debug!("profile complete at {}s, measured {}", t, measured);
        }
        Ok(done)
    }

    fn apply_at(&mut self, t: f64) -> Setpoint {
        let setpoint = self.profile.setpoint(t);
        self.sink.apply(&setpoint);
        setpoint
    }

    /// Where the profile ends.
    #[inline]
    pub fn final_target(&self) -> f64 {
        self.final_target
    }

    /// Allowed distance from the final target to report completion.
    #[inline]
    pub fn allowable_error(&self) -> f64 {
        self.allowable_error
    }

    /// The profile being executed.
    #[inline]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }
}

/// A [`ProfileExecutor`] that can also be stepped on a fixed period without
/// a clock, for simulated or step-driven loops.
#[derive(Debug)]
pub struct StaticProfileExecutor<CLOCK, SINK, SENSOR>
where
    CLOCK: TimeSource,
    SINK: SetpointSink,
    SENSOR: MeasurementSource,
{
    inner: ProfileExecutor<CLOCK, SINK, SENSOR>,
    step: u64,
    step_period: f64,
}

impl<CLOCK, SINK, SENSOR> StaticProfileExecutor<CLOCK, SINK, SENSOR>
where
    CLOCK: TimeSource,
    SINK: SetpointSink,
    SENSOR: MeasurementSource,
{
    /// Create a new executor stepping at [`DEFAULT_STEP_PERIOD`].
    pub fn new(
        profile: Profile,
        clock: CLOCK,
        sink: SINK,
        sensor: SENSOR,
        allowable_error: f64,
    ) -> Self {
        Self {
            inner: ProfileExecutor::new(profile, clock, sink, sensor, allowable_error),
            step: 0,
            step_period: DEFAULT_STEP_PERIOD,
        }
    }

    /// Create an executor using tolerance and step period from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn from_config(
        profile: Profile,
        clock: CLOCK,
        sink: SINK,
        sensor: SENSOR,
        config: &ExecutorConfig,
    ) -> Result<Self> {
        config.validate()?;
        Self::new(profile, clock, sink, sensor, config.allowable_error)
            .with_step_period(config.step_period_secs)
    }

    /// Override the fixed step length in seconds.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidStepPeriod` unless `step_period` is
    /// finite and positive.
    pub fn with_step_period(mut self, step_period: f64) -> Result<Self> {
        check_step_period(step_period)?;
        self.step_period = step_period;
        Ok(self)
    }

    /// Record the start time, rewind the profile, and zero the step counter.
    pub fn initialize(&mut self) {
        self.step = 0;
        self.inner.initialize();
    }

    /// Clock-driven update with completion test; see [`ProfileExecutor::update`].
    pub fn update(&mut self) -> Result<bool> {
        self.inner.update()
    }

    /// Apply the setpoint for the current step and advance one step.
    ///
    /// Reads neither clock nor sensor and never reports completion.
    pub fn update_no_end(&mut self) -> Setpoint {
        let t = self.step as f64 * self.step_period;
        self.step = self.step.saturating_add(1);
        self.inner.apply_at(t)
    }

    /// Steps taken by `update_no_end` since `initialize`.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.step
    }

    /// Where the profile ends.
    #[inline]
    pub fn final_target(&self) -> f64 {
        self.inner.final_target()
    }

    /// The profile being executed.
    #[inline]
    pub fn profile(&self) -> &Profile {
        self.inner.profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};
    use core::cell::Cell;

    fn trapezoid() -> Profile {
        Profile::new(0.0, 0.0, 16.0, 4.0, 2.0, 1.0).unwrap()
    }

    #[test]
    fn test_update_before_initialize() {
        let mut executor = ProfileExecutor::new(trapezoid(), || 0.0, |_: &Setpoint| {}, || 0.0, 0.1);

        assert!(matches!(
            executor.update(),
            Err(Error::Executor(ExecutorError::NotStarted))
        ));
    }

    #[test]
    fn test_update_forwards_setpoint_and_reports_completion() {
        let now = Cell::new(10.0);
        let measured = Cell::new(0.0);
        let last = Cell::new(Setpoint::default());

        let mut executor = ProfileExecutor::new(
            trapezoid(),
            || now.get(),
            |sp: &Setpoint| last.set(*sp),
            || measured.get(),
            0.05,
        );
        assert_eq!(executor.final_target(), 16.0);

        executor.initialize();
        now.set(13.0);
        assert!(!executor.update().unwrap());
        assert!((last.get().position - 8.0).abs() < 1e-9);
        assert_eq!(last.get().velocity, 4.0);

        now.set(20.0);
        measured.set(15.98);
        assert!(executor.update().unwrap());
        assert_eq!(last.get(), Setpoint::terminal(16.0));
    }

    #[test]
    fn test_update_no_end_steps_fixed_period() {
        let applied = Cell::new(0u32);
        let last = Cell::new(Setpoint::default());

        let mut executor = StaticProfileExecutor::new(
            trapezoid(),
            || 0.0,
            |sp: &Setpoint| {
                applied.set(applied.get() + 1);
                last.set(*sp);
            },
            || 0.0,
            0.05,
        );

        let first = executor.update_no_end();
        assert_eq!(first.position, 0.0);

        // 50 steps of 20 ms lands on t = 1.0 for the 51st sample
        for _ in 0..50 {
            executor.update_no_end();
        }
        assert_eq!(executor.steps(), 51);
        assert_eq!(applied.get(), 51);
        assert!((last.get().velocity - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_initialize_resets_step_counter() {
        let mut executor =
            StaticProfileExecutor::new(trapezoid(), || 0.0, |_: &Setpoint| {}, || 0.0, 0.05)
                .with_step_period(0.5)
                .unwrap();

        executor.update_no_end();
        executor.update_no_end();
        executor.initialize();
        assert_eq!(executor.steps(), 0);
    }

    #[test]
    fn test_rejects_bad_step_period() {
        for step_period in [0.0, -0.02, f64::NAN, f64::INFINITY] {
            let result =
                StaticProfileExecutor::new(trapezoid(), || 0.0, |_: &Setpoint| {}, || 0.0, 0.05)
                    .with_step_period(step_period);
            assert!(matches!(
                result,
                Err(Error::Config(ConfigError::InvalidStepPeriod(_)))
            ));
        }
    }

    #[test]
    fn test_from_config_validates() {
        let config = ExecutorConfig {
            allowable_error: 0.05,
            step_period_secs: 0.0,
        };
        assert!(StaticProfileExecutor::from_config(
            trapezoid(),
            || 0.0,
            |_: &Setpoint| {},
            || 0.0,
            &config
        )
        .is_err());

        let config = ExecutorConfig {
            allowable_error: -1.0,
            ..ExecutorConfig::default()
        };
        assert!(matches!(
            ProfileExecutor::from_config(trapezoid(), || 0.0, |_: &Setpoint| {}, || 0.0, &config),
            Err(Error::Config(ConfigError::InvalidAllowableError(_)))
        ));

        let executor = StaticProfileExecutor::from_config(
            trapezoid(),
            || 0.0,
            |_: &Setpoint| {},
            || 0.0,
            &ExecutorConfig::default(),
        )
        .unwrap();
        assert_eq!(executor.final_target(), 16.0);
    }

    #[test]
    fn test_step_counter_saturates() {
        let mut executor =
            StaticProfileExecutor::new(trapezoid(), || 0.0, |_: &Setpoint| {}, || 0.0, 0.05);
        executor.step = u64::MAX;

        let sp = executor.update_no_end();
        assert_eq!(executor.steps(), u64::MAX);
        assert_eq!(sp, Setpoint::terminal(16.0));
    }
}
