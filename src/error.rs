//! Error types for axis-motion.
//!
//! Provides unified error handling across configuration, profile planning,
//! feedback control, and profile execution.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all axis-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Profile planning error
    Profile(ProfileError),
    /// Feedback controller error
    Control(ControlError),
    /// Profile executor error
    Executor(ExecutorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Axis name not found in configuration
    AxisNotFound(heapless::String<32>),
    /// Move name not found in configuration
    MoveNotFound(heapless::String<32>),
    /// Move references an axis that does not exist
    UnknownAxis {
        /// Move name
        name: heapless::String<32>,
        /// Referenced axis name
        axis: heapless::String<32>,
    },
    /// Invalid velocity or acceleration percent (must be 1-200)
    InvalidPercent(u8),
    /// Invalid allowable error (must be >= 0)
    InvalidAllowableError(f64),
    /// Invalid executor step period (must be > 0)
    InvalidStepPeriod(f64),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Profile planning errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// A velocity or acceleration limit is zero, negative or not finite
    InvalidConstraint {
        /// Constraint name
        name: &'static str,
        /// Offending value
        value: f64,
    },
    /// A kinematic input is NaN or infinite
    NonFiniteInput {
        /// Input name
        name: &'static str,
        /// Offending value
        value: f64,
    },
    /// Segment average velocity is zero so its duration is undefined
    ZeroVelocitySegment,
    /// Segment velocity and distance disagree in sign
    NegativeDuration {
        /// Computed duration in seconds
        duration: f64,
    },
    /// Planner did not converge within the segment capacity
    TooManySegments,
}

/// Feedback controller errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlError {
    /// Controller used before `initialize`
    NotInitialized,
    /// Output bounds are not ordered or not finite
    InvalidBounds {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
    /// Continuous input range is empty or not finite
    InvalidInputRange {
        /// Lower end of the range
        min: f64,
        /// Upper end of the range
        max: f64,
    },
    /// Fixed control period must be > 0
    InvalidPeriod(f64),
    /// Fixed-period update on a controller configured without a period
    NoFixedPeriod,
    /// Gain is NaN or infinite
    InvalidGain {
        /// Gain name
        name: &'static str,
        /// Offending value
        value: f64,
    },
}

/// Profile executor errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutorError {
    /// Executor updated before `initialize`
    NotStarted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Profile(e) => write!(f, "Profile error: {}", e),
            Error::Control(e) => write!(f, "Control error: {}", e),
            Error::Executor(e) => write!(f, "Executor error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::AxisNotFound(name) => write!(f, "Axis '{}' not found", name),
            ConfigError::MoveNotFound(name) => write!(f, "Move '{}' not found", name),
            ConfigError::UnknownAxis { name, axis } => {
                write!(f, "Move '{}' references unknown axis '{}'", name, axis)
            }
            ConfigError::InvalidPercent(v) => write!(f, "Invalid percent: {}. Must be 1-200", v),
            ConfigError::InvalidAllowableError(v) => {
                write!(f, "Invalid allowable error: {}. Must be >= 0", v)
            }
            ConfigError::InvalidStepPeriod(v) => {
                write!(f, "Invalid step period: {}. Must be > 0", v)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::InvalidConstraint { name, value } => {
                write!(f, "Invalid {}: {}. Must be finite and > 0", name, value)
            }
            ProfileError::NonFiniteInput { name, value } => {
                write!(f, "Non-finite {}: {}", name, value)
            }
            ProfileError::ZeroVelocitySegment => {
                write!(f, "Segment average velocity is zero")
            }
            ProfileError::NegativeDuration { duration } => {
                write!(f, "Segment duration {} is negative", duration)
            }
            ProfileError::TooManySegments => write!(f, "Profile needs too many segments"),
        }
    }
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::NotInitialized => write!(f, "Controller not initialized"),
            ControlError::InvalidBounds { min, max } => {
                write!(f, "Invalid output bounds: min ({}) must be <= max ({})", min, max)
            }
            ControlError::InvalidInputRange { min, max } => {
                write!(f, "Invalid input range: min ({}) must be < max ({})", min, max)
            }
            ControlError::InvalidPeriod(v) => write!(f, "Invalid period: {}. Must be > 0", v),
            ControlError::NoFixedPeriod => write!(f, "Controller has no fixed period"),
            ControlError::InvalidGain { name, value } => {
                write!(f, "Invalid gain {}: {}. Must be finite", name, value)
            }
        }
    }
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutorError::NotStarted => write!(f, "Executor not started"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<ProfileError> for Error {
    fn from(e: ProfileError) -> Self {
        Error::Profile(e)
    }
}

impl From<ControlError> for Error {
    fn from(e: ControlError) -> Self {
        Error::Control(e)
    }
}

impl From<ExecutorError> for Error {
    fn from(e: ExecutorError) -> Self {
        Error::Executor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for ProfileError {}

#[cfg(feature = "std")]
impl std::error::Error for ControlError {}

#[cfg(feature = "std")]
impl std::error::Error for ExecutorError {}
