//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::motion::Profile;

use super::axis::AxisConfig;
use super::moves::MoveConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Named axis configurations.
    pub axes: FnvIndexMap<String<32>, AxisConfig, 8>,

    /// Named point-to-point moves.
    #[serde(default)]
    pub moves: FnvIndexMap<String<32>, MoveConfig, 32>,
}

impl SystemConfig {
    /// Get an axis configuration by name.
    pub fn axis(&self, name: &str) -> Option<&AxisConfig> {
        self.axes
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a move configuration by name.
    pub fn move_config(&self, name: &str) -> Option<&MoveConfig> {
        self.moves
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all axis names.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(|s| s.as_str())
    }

    /// List all move names.
    pub fn move_names(&self) -> impl Iterator<Item = &str> {
        self.moves.keys().map(|s| s.as_str())
    }

    /// Plan a named move from the axis' current state.
    ///
    /// # Errors
    ///
    /// Returns an error if the move or its axis is not configured, or the
    /// scaled limits do not validate.
    pub fn plan_move(
        &self,
        name: &str,
        current_velocity: f64,
        current_position: f64,
    ) -> Result<Profile> {
        let mv = self
            .move_config(name)
            .ok_or_else(|| ConfigError::MoveNotFound(truncated(name)))?;
        let axis = self
            .axis(mv.axis.as_str())
            .ok_or_else(|| ConfigError::AxisNotFound(mv.axis.clone()))?;

        Profile::from_constraints(
            current_velocity,
            current_position,
            mv.target,
            &mv.constraints(axis),
        )
    }
}

/// Copy up to 32 bytes of `name` on a char boundary.
pub(crate) fn truncated(name: &str) -> String<32> {
    let mut out = String::new();
    for c in name.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            axes: FnvIndexMap::new(),
            moves: FnvIndexMap::new(),
        }
    }
}
