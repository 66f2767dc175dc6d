//! Observation site position.

use serde::{Deserialize, Serialize};

use crate::error::{GfsError, GfsResult};

/// Lowest accepted site altitude [m].
pub const MIN_ALTITUDE_M: f64 = -500.0;

/// A geographic site the model column is interpolated to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Latitude [deg N], -90 to 90
    pub latitude: f64,
    /// Longitude [deg E], -180 to 180
    pub longitude: f64,
    /// Geopotential altitude [m]
    pub altitude_m: f64,
}

impl Site {
    /// Create a validated site.
    pub fn new(latitude: f64, longitude: f64, altitude_m: f64) -> GfsResult<Self> {
        Ok(Self {
            latitude: validate_latitude(latitude)?,
            longitude: validate_longitude(longitude)?,
            altitude_m: validate_altitude(altitude_m)?,
        })
    }
}

pub fn validate_latitude(lat: f64) -> GfsResult<f64> {
    if (-90.0..=90.0).contains(&lat) {
        Ok(lat)
    } else {
        Err(GfsError::InvalidLatitude(lat))
    }
}

pub fn validate_longitude(lon: f64) -> GfsResult<f64> {
    if (-180.0..=180.0).contains(&lon) {
        Ok(lon)
    } else {
        Err(GfsError::InvalidLongitude(lon))
    }
}

pub fn validate_altitude(alt: f64) -> GfsResult<f64> {
    // NaN fails the comparison and is rejected too
    if alt >= MIN_ALTITUDE_M {
        Ok(alt)
    } else {
        Err(GfsError::InvalidAltitude(alt))
    }
}
