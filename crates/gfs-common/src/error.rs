//! Error types for GFS request validation.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias using GfsError.
pub type GfsResult<T> = Result<T, GfsError>;

/// Validation errors for sites, products and model cycles.
#[derive(Debug, Error, PartialEq)]
pub enum GfsError {
    // === Site Errors ===
    #[error("invalid latitude: {0} (expected -90 to 90 deg)")]
    InvalidLatitude(f64),

    #[error("invalid longitude: {0} (expected -180 to 180 deg)")]
    InvalidLongitude(f64),

    #[error("invalid altitude: {0} m (must be at least {} m)", crate::site::MIN_ALTITUDE_M)]
    InvalidAltitude(f64),

    // === Cycle Errors ===
    #[error("bad GFS production date: {0}")]
    InvalidDate(String),

    #[error("GFS production date too early: {0}")]
    DateTooEarly(NaiveDate),

    #[error("invalid GFS production cycle: {0} (expected 0, 6, 12 or 18)")]
    InvalidCycle(u32),

    // === Product Errors ===
    #[error("invalid GFS product name: {0}")]
    InvalidProduct(String),

    #[error("invalid forecast hour {hour}: {reason}")]
    InvalidForecastHour { hour: u32, reason: &'static str },

    // === Grid Errors ===
    #[error("invalid lat/lon grid code: {0} (expected e.g. 0p25)")]
    InvalidGridCode(String),
}
