//! Example: Configuration-driven move execution.
//!
//! This example demonstrates how to:
//! - Load axis and move configuration from TOML
//! - Plan a named move into a motion profile
//! - Close a PIDF position loop around the profile on a simulated axis
//! - Spin up a flywheel with the take-back-half controller
//!
//! Run with: `cargo run --example config_driven --features std`

use core::cell::Cell;

use axis_motion::{
    parse_config, PidController, Result, Setpoint, StaticProfileExecutor, TakeBackHalf,
};

const CONFIG: &str = r#"
[axes.lift]
name = "Lift"
max_velocity = 0.8
max_acceleration = 1.6
max_deceleration = 0.8

[axes.lift.pid]
gains = { kp = 8.0, ki = 0.5, kv = 1.0 }
output_bounds = { min = -1.0, max = 1.0 }
period_secs = 0.02

[axes.lift.executor]
allowable_error = 0.005
step_period_secs = 0.02

[axes.flywheel]
name = "Flywheel"
max_velocity = 3000.0
max_acceleration = 1000.0

[axes.flywheel.take_back_half]
gain = 0.00002

[moves.raise]
axis = "lift"
target = 1.2

[moves.lower_gently]
axis = "lift"
target = 0.0
velocity_percent = 50
acceleration_percent = 50
"#;

/// Lift speed at full output, in units per second.
const LIFT_SPEED_AT_FULL_OUTPUT: f64 = 1.0;

/// Flywheel free speed at full output, in rpm.
const FLYWHEEL_FREE_SPEED: f64 = 3600.0;

fn main() -> Result<()> {
    println!("=== Configuration-Driven Move Example ===\n");

    let config = parse_config(CONFIG)?;

    println!("Axes:");
    for name in config.axis_names() {
        if let Some(axis) = config.axis(name) {
            let limits = axis.constraints();
            println!(
                "  - {} ({}): v {} a {} d {}{}",
                name,
                axis.name,
                limits.max_velocity,
                limits.max_acceleration,
                limits.deceleration(),
                if limits.is_asymmetric() { " [asymmetric]" } else { "" }
            );
        }
    }
    println!();

    println!("Moves:");
    for name in config.move_names() {
        let profile = config.plan_move(name, 0.0, 0.0)?;
        let kinds: Vec<&str> = profile.segments().iter().map(|s| s.kind.as_str()).collect();
        println!(
            "  - {} → {:.2} in {:.3}s [{}]",
            name,
            profile.total_distance(),
            profile.duration(),
            kinds.join(", ")
        );
    }
    println!();

    run_lift(&config)?;
    run_flywheel(&config)?;

    Ok(())
}

/// Track the `raise` move with the lift position loop.
fn run_lift(config: &axis_motion::SystemConfig) -> Result<()> {
    println!("Lift: executing 'raise'");
    println!("{}", "-".repeat(60));

    let Some(lift) = config.axis("lift") else {
        return Ok(());
    };
    let Some(pid_config) = lift.pid else {
        return Ok(());
    };

    let position = Cell::new(0.0);
    let setpoint = Cell::new(Setpoint::default());

    let profile = config.plan_move("raise", 0.0, position.get())?;
    let duration = profile.duration();
    let mut executor = StaticProfileExecutor::from_config(
        profile,
        || 0.0,
        |sp: &Setpoint| setpoint.set(*sp),
        || position.get(),
        &lift.executor,
    )?;

    let mut pid = PidController::new(pid_config)?;
    pid.initialize(position.get(), 0.0);
    executor.initialize();

    let dt = lift.executor.step_period_secs;
    let steps = ((duration + 1.0) / dt) as usize;
    for step in 0..steps {
        executor.update_no_end();
        let output = pid.calculate(position.get(), &setpoint.get())?;
        position.set(position.get() + output * LIFT_SPEED_AT_FULL_OUTPUT * dt);

        if step % 25 == 0 {
            let sp = setpoint.get();
            println!(
                "  t={:5.2}s  setpoint {:6.3} @ {:6.3}/s  actual {:6.3}  output {:6.3}",
                step as f64 * dt,
                sp.position,
                sp.velocity,
                position.get(),
                output
            );
        }
    }

    let error = (executor.final_target() - position.get()).abs();
    println!(
        "  settled at {:.4} (error {:.4}, within tolerance: {})\n",
        position.get(),
        error,
        error <= lift.executor.allowable_error
    );

    Ok(())
}

/// Bring the flywheel up to speed with take-back-half.
fn run_flywheel(config: &axis_motion::SystemConfig) -> Result<()> {
    println!("Flywheel: spinning up to 2400 rpm");
    println!("{}", "-".repeat(60));

    let Some(tbh_config) = config.axis("flywheel").and_then(|a| a.take_back_half) else {
        return Ok(());
    };

    let mut tbh = TakeBackHalf::from_config(&tbh_config)?;
    tbh.initialize(0.0);

    let target = 2400.0;
    let mut speed = 0.0;
    for step in 0..200 {
        let output = tbh.calculate(speed, target);
        // First-order plant: speed relaxes toward output times free speed
        speed += 0.1 * (output * FLYWHEEL_FREE_SPEED - speed);

        if step % 20 == 0 {
            println!("  step {:3}  speed {:7.1} rpm  output {:5.3}", step, speed, output);
        }
    }
    println!("  final speed {:.1} rpm", speed);

    Ok(())
}
