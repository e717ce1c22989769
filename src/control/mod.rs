//! Control module for axis-motion.
//!
//! Provides PID/PIDF feedback with feedforward, a take-back-half adaptive
//! controller, and a cumulative-bias steering wrapper.

mod bounds;
mod gains;
mod pid;
mod steering;
mod take_back_half;

pub use bounds::Bounds;
pub use gains::Gains;
pub use pid::PidController;
pub use steering::SteeringController;
pub use take_back_half::TakeBackHalf;
