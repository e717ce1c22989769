//! # axis-motion
//!
//! Single-axis motion profiles and feedback control for position and
//! velocity loops.
//!
//! ## Features
//!
//! - **Asymmetric profiles**: Independent acceleration and deceleration rates
//! - **Any starting state**: Plans from a moving axis, including reversals
//! - **PIDF control**: Feedforward, continuous input and integral anti-windup
//! - **Take-back-half**: Model-free velocity control for flywheel-like plants
//! - **Configuration-driven**: Define axes and named moves in TOML files
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use axis_motion::{PidController, Setpoint};
//!
//! // Load configuration from TOML
//! let config = axis_motion::load_config("axes.toml")?;
//! let axis = config.axis("lift").unwrap();
//!
//! // Plan the named move from rest at 0
//! let mut profile = config.plan_move("raise", 0.0, 0.0)?;
//!
//! // Track it with the axis position loop
//! let mut pid = PidController::new(axis.pid.unwrap())?;
//! pid.initialize(encoder.read(), 0.0);
//!
//! let mut t = 0.0;
//! while !profile.is_finished(t) {
//!     let setpoint = profile.setpoint(t);
//!     motor.set(pid.calculate(encoder.read(), &setpoint)?);
//!     t += 0.02;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets
//! - `log`: Enables `log` facade logging for hosted targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod control;
pub mod error;
pub mod math;
pub mod motion;

// Re-exports for ergonomic API
pub use config::{
    validate_config, AxisConfig, ExecutorConfig, MoveConfig, PidConfig, ProfileConstraints,
    SystemConfig, TakeBackHalfConfig,
};
pub use control::{Bounds, Gains, PidController, SteeringController, TakeBackHalf};
pub use error::{Error, Result};
pub use motion::{
    Chunk, MeasurementSource, Profile, ProfileExecutor, Segment, SegmentKind, Setpoint,
    SetpointSink, StaticProfileExecutor, TimeSource, Transition,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
