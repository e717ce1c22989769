//! Configuration module for axis-motion.
//!
//! Provides types for loading and validating axis limits, controller
//! settings and named moves from TOML files (with `std` feature) or
//! pre-parsed data.

mod axis;
mod constraints;
mod controller;
#[cfg(feature = "std")]
mod loader;
mod moves;
mod system;
mod validation;

pub use axis::AxisConfig;
pub use constraints::ProfileConstraints;
pub use controller::{ExecutorConfig, PidConfig, TakeBackHalfConfig};
pub(crate) use controller::check_step_period;
pub use moves::MoveConfig;
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

/// Copy as much of `message` as fits into an error string.
#[cfg(feature = "std")]
fn truncate_message(message: &str) -> heapless::String<128> {
    let mut out = heapless::String::new();
    for c in message.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
