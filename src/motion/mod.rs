//! Motion module for axis-motion.
//!
//! Provides motion profile planning, setpoint sampling, and per-tick
//! execution.

mod chunk;
mod executor;
mod planner;
mod profile;
mod setpoint;
mod sources;
mod transition;

pub use chunk::Chunk;
pub use executor::{ProfileExecutor, StaticProfileExecutor, DEFAULT_STEP_PERIOD};
pub use planner::{Segment, SegmentKind, Segments, MAX_SEGMENTS};
pub use profile::Profile;
pub use setpoint::Setpoint;
pub use sources::{MeasurementSource, SetpointSink, TimeSource};
pub use transition::Transition;
