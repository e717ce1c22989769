//! Integration tests for axis-motion.
//!
//! These tests verify the complete workflow from TOML parsing through
//! profile planning, execution, and feedback control.

use core::cell::Cell;

use axis_motion::config::ExecutorConfig;
use axis_motion::error::{ConfigError, Error, ExecutorError};
use axis_motion::{
    parse_config, Bounds, Gains, PidConfig, PidController, Profile, SegmentKind, Setpoint,
    StaticProfileExecutor, TakeBackHalf,
};
use axis_motion::{ProfileExecutor, SystemConfig};

// =============================================================================
// Test configuration data
// =============================================================================

const FULL_CONFIG: &str = r#"
[axes.lift]
name = "Lift"
max_velocity = 4.0
max_acceleration = 2.0
max_deceleration = 1.0

[axes.lift.pid]
gains = { kp = 1.0 }
output_bounds = { min = -1.0, max = 1.0 }
period_secs = 1.0

[axes.lift.executor]
allowable_error = 0.01
step_period_secs = 0.05

[axes.flywheel]
name = "Flywheel"
max_velocity = 3000.0
max_acceleration = 1000.0

[axes.flywheel.take_back_half]
gain = 0.0002

[moves.raise]
axis = "lift"
target = 16.0

[moves.raise_slow]
axis = "lift"
target = 16.0
velocity_percent = 50
"#;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}

// =============================================================================
// Profile planning
// =============================================================================

#[test]
fn test_trapezoid_from_rest() {
    let mut profile = Profile::new(0.0, 0.0, 16.0, 4.0, 2.0, 1.0).unwrap();

    assert_close(profile.duration(), 7.0);
    assert_close(profile.acceleration(0.0), 2.0);
    assert_close(profile.velocity(1.5), 3.0);
    assert_close(profile.velocity(2.0), 4.0);
    assert_close(profile.position(3.0), 8.0);
    assert_close(profile.acceleration(6.5), -1.0);
    assert_close(profile.position(7.0), 16.0);
}

#[test]
fn test_already_cruising() {
    let mut profile = Profile::new(8.0, 0.0, 40.0, 8.0, 2.0, 1.0).unwrap();

    assert_close(profile.duration(), 9.0);
    assert_close(profile.velocity(0.5), 8.0);
    assert_close(profile.position(9.0), 40.0);
}

#[test]
fn test_overshoot_reverses() {
    let mut profile = Profile::new(10.0, 0.0, 34.0, 10.0, 1.0, 1.0).unwrap();

    assert_close(profile.duration(), 18.0);
    assert_close(profile.velocity(14.0), -4.0);
    assert_close(profile.position(18.0), 34.0);
    assert_close(profile.position(10.0), 50.0);
    assert_eq!(
        profile.segments().last().map(|s| s.kind),
        Some(SegmentKind::Decelerate)
    );
}

#[test]
fn test_offset_start_and_backward_queries() {
    let mut profile = Profile::new(0.0, 100.0, 84.0, 4.0, 2.0, 1.0).unwrap();

    assert_close(profile.duration(), 7.0);
    assert_close(profile.position(6.0), 84.5);
    // Earlier query after a later one
    assert_close(profile.position(3.0), 92.0);
    assert_close(profile.velocity(1.5), -3.0);
    assert_close(profile.position(20.0), 84.0);
    assert_eq!(profile.velocity(20.0), 0.0);
}

#[test]
fn test_invalid_limits_rejected() {
    assert!(Profile::new(0.0, 0.0, 1.0, 0.0, 1.0, 1.0).is_err());
    assert!(Profile::new(0.0, 0.0, 1.0, 1.0, -1.0, 1.0).is_err());
    assert!(Profile::new(f64::NAN, 0.0, 1.0, 1.0, 1.0, 1.0).is_err());
}

// =============================================================================
// Feedback control
// =============================================================================

#[test]
fn test_pid_saturates() {
    let config = PidConfig::new(Gains::pid(1.0, 0.0, 0.0), Bounds::new(-1.0, 1.0)).with_period(1.0);
    let mut pid = PidController::new(config).unwrap();
    pid.initialize(0.0, 0.0);

    let output = pid.calculate(-5.0, &Setpoint::new(0.0, 0.0, 0.0, 0.0, 0.0)).unwrap();
    assert_eq!(output, 1.0);
}

#[test]
fn test_take_back_half_sequence() {
    let mut tbh = TakeBackHalf::new(0.0002, 1.0).unwrap();
    tbh.initialize(0.0);

    assert_close(tbh.calculate(0.0, 2000.0), 0.4);
    assert_close(tbh.calculate(0.0, 2000.0), 0.8);
    assert_close(tbh.calculate(0.0, 2000.0), 1.0);
    assert!((tbh.calculate(2000.5, 2000.0) - 0.5).abs() < 1e-3);
}

#[test]
fn test_continuous_pidf_saturates() {
    let config = PidConfig::new(Gains::pid(0.02, 0.0, 0.01), Bounds::new(-2.0, 2.0))
        .continuous(Bounds::new(10.0, 370.0))
        .with_derivative_on_input();
    let mut pid = PidController::new(config).unwrap();
    pid.initialize_at(10.0, 0.0, 0.0);

    let output = pid.calculate_raw_at(20.0, 280.0, 0.0, 0.0, 0.0).unwrap();
    assert_close(output, -2.0);
}

// =============================================================================
// Execution
// =============================================================================

#[test]
fn test_executor_tracks_to_completion() {
    let now = Cell::new(0.0);
    let applied = Cell::new(0.0);

    let profile = Profile::new(0.0, 0.0, 16.0, 4.0, 2.0, 1.0).unwrap();
    let mut executor = ProfileExecutor::new(
        profile,
        || now.get(),
        |sp: &Setpoint| applied.set(sp.position),
        || applied.get(),
        0.01,
    );

    assert!(matches!(
        executor.update(),
        Err(Error::Executor(ExecutorError::NotStarted))
    ));

    executor.initialize();
    let mut done = false;
    let mut ticks = 0;
    while !done {
        now.set(now.get() + 0.1);
        done = executor.update().unwrap();
        ticks += 1;
        assert!(ticks < 1000);
    }

    assert!(now.get() > 6.8);
    assert!((applied.get() - 16.0).abs() <= 0.01);
    assert_close(executor.final_target(), 16.0);
}

#[test]
fn test_static_executor_steps_through_profile() {
    let last = Cell::new(Setpoint::default());

    let profile = Profile::new(0.0, 0.0, 16.0, 4.0, 2.0, 1.0).unwrap();
    let mut executor = StaticProfileExecutor::new(
        profile,
        || 0.0,
        |sp: &Setpoint| last.set(*sp),
        || 0.0,
        0.0,
    )
    .with_step_period(0.5)
    .unwrap();

    executor.initialize();
    let first = executor.update_no_end();
    assert_close(first.position, 0.0);
    assert_close(first.acceleration, 2.0);

    for _ in 0..20 {
        executor.update_no_end();
    }
    assert_eq!(executor.steps(), 21);
    assert_close(last.get().position, 16.0);
    assert_eq!(last.get().velocity, 0.0);
    assert_eq!(last.get().acceleration, 0.0);

    executor.initialize();
    assert_eq!(executor.steps(), 0);
    assert_close(executor.update_no_end().position, 0.0);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_full_config_plans_moves() {
    let config = parse_config(FULL_CONFIG).unwrap();

    let names: Vec<&str> = config.axis_names().collect();
    assert_eq!(names, ["lift", "flywheel"]);

    let profile = config.plan_move("raise", 0.0, 0.0).unwrap();
    assert_close(profile.duration(), 7.0);

    // Half speed: 1 s up to 2, 2 s down, 13 units cruising at 2
    let slow = config.plan_move("raise_slow", 0.0, 0.0).unwrap();
    assert_close(slow.duration(), 9.5);
}

#[test]
fn test_config_drives_controllers() {
    let config = parse_config(FULL_CONFIG).unwrap();

    let lift = config.axis("lift").unwrap();
    let mut pid = PidController::new(lift.pid.unwrap()).unwrap();
    pid.initialize(0.0, 0.0);
    assert_eq!(pid.calculate(-5.0, &Setpoint::terminal(0.0)).unwrap(), 1.0);

    let flywheel = config.axis("flywheel").unwrap();
    let mut tbh = TakeBackHalf::from_config(&flywheel.take_back_half.unwrap()).unwrap();
    tbh.initialize(0.0);
    assert_close(tbh.calculate(0.0, 2000.0), 0.4);

    let profile = config.plan_move("raise", 0.0, 0.0).unwrap();
    let mut executor =
        StaticProfileExecutor::from_config(profile, || 0.0, |_: &Setpoint| {}, || 0.0, &lift.executor)
            .unwrap();
    executor.initialize();
    executor.update_no_end();
    assert_close(executor.update_no_end().position, 0.5 * 2.0 * 0.05 * 0.05);
}

#[test]
fn test_missing_names() {
    let config = parse_config(FULL_CONFIG).unwrap();

    assert!(matches!(
        config.plan_move("lower", 0.0, 0.0),
        Err(Error::Config(ConfigError::MoveNotFound(_)))
    ));
    assert!(config.axis("arm").is_none());
}

#[test]
fn test_move_to_unknown_axis_rejected() {
    let toml = r#"
[axes.lift]
name = "Lift"
max_velocity = 4.0
max_acceleration = 2.0

[moves.swing]
axis = "arm"
target = 1.0
"#;

    assert!(matches!(
        parse_config(toml),
        Err(Error::Config(ConfigError::UnknownAxis { .. }))
    ));
}

#[test]
fn test_out_of_range_percent_rejected() {
    let toml = r#"
[axes.lift]
name = "Lift"
max_velocity = 4.0
max_acceleration = 2.0

[moves.raise]
axis = "lift"
target = 1.0
velocity_percent = 0
"#;

    assert!(matches!(
        parse_config(toml),
        Err(Error::Config(ConfigError::InvalidPercent(0)))
    ));
}

#[test]
fn test_default_executor_config() {
    let config = SystemConfig::default();
    assert_eq!(config.axis_names().count(), 0);
    assert_eq!(ExecutorConfig::default().step_period_secs, 0.020);
}
