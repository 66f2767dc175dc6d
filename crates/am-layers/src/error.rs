//! Error types for profile construction and layer synthesis.

use gfs_common::{PressureLevel, Variable};
use thiserror::Error;

/// Errors raised when assembling a profile from level records.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProfileError {
    #[error("profile has no levels")]
    Empty,

    #[error("levels must be strictly increasing in pressure: {above} followed by {below}")]
    Unordered {
        above: PressureLevel,
        below: PressureLevel,
    },
}

/// Errors that abort layer synthesis before any layer is produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayerError {
    #[error(
        "User-specified altitude exceeds top GFS level \
         ({altitude} m above {top_height} m at {level})"
    )]
    AltitudeAboveModelTop {
        altitude: f64,
        top_height: f64,
        level: PressureLevel,
    },

    #[error("top GFS level {level} is missing {field}")]
    MissingTopLevel { level: PressureLevel, field: Variable },

    #[error("missing {field} at GFS level {level}")]
    MissingLevelData { level: PressureLevel, field: Variable },

    #[error("at least two levels are needed to extrapolate below the lowest model level")]
    InsufficientLevels,

    #[error("geopotential height does not decrease from {above} to {below}")]
    HeightInversion {
        above: PressureLevel,
        below: PressureLevel,
    },
}

pub type ProfileResult<T> = Result<T, ProfileError>;
pub type LayerResult<T> = Result<T, LayerError>;
