//! Configuration validation.

use crate::error::{ConfigError, Result};

use super::axis::AxisConfig;
use super::moves::MoveConfig;
use super::system::truncated;
use super::SystemConfig;

/// Validate a system configuration.
///
/// Checks:
/// - Axis limits are finite and strictly positive
/// - Controller and executor settings are valid
/// - Moves reference existing axes
/// - Velocity/acceleration percentages are in range
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (_, axis) in config.axes.iter() {
        validate_axis(axis)?;
    }

    for (name, mv) in config.moves.iter() {
        validate_move(name.as_str(), mv, config)?;
    }

    Ok(())
}

fn validate_axis(axis: &AxisConfig) -> Result<()> {
    axis.constraints().validate()?;

    if let Some(ref pid) = axis.pid {
        pid.validate()?;
    }

    if let Some(ref tbh) = axis.take_back_half {
        tbh.validate()?;
    }

    axis.executor.validate()
}

fn validate_move(name: &str, mv: &MoveConfig, config: &SystemConfig) -> Result<()> {
    if config.axis(mv.axis.as_str()).is_none() {
        return Err(ConfigError::UnknownAxis {
            name: truncated(name),
            axis: mv.axis.clone(),
        }
        .into());
    }

    mv.check_percents()?;

    if !mv.target.is_finite() {
        return Err(crate::error::ProfileError::NonFiniteInput {
            name: "target",
            value: mv.target,
        }
        .into());
    }

    Ok(())
}
