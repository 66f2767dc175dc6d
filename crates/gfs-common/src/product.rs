//! GFS product selection: analysis or forecast hour.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GfsError, GfsResult};

/// Longest forecast offered on the 0.25 degree grid [h].
pub const MAX_FORECAST_HOUR: u32 = 384;

/// Forecasts are hourly up to this hour and 3-hourly after it.
pub const HOURLY_FORECAST_LIMIT: u32 = 120;

/// A GFS product within one production cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GfsProduct {
    /// Analysis at production time ("anl")
    Analysis,
    /// Forecast this many hours after production time ("fNNN")
    Forecast(u32),
}

impl GfsProduct {
    /// Create a validated forecast product.
    pub fn forecast(hour: u32) -> GfsResult<Self> {
        if hour > MAX_FORECAST_HOUR {
            return Err(GfsError::InvalidForecastHour {
                hour,
                reason: "out of range",
            });
        }
        if hour > HOURLY_FORECAST_LIMIT && hour % 3 != 0 {
            return Err(GfsError::InvalidForecastHour {
                hour,
                reason: "3-hourly only after 120 h",
            });
        }
        Ok(GfsProduct::Forecast(hour))
    }

    /// Forecast offset from the cycle time (0 for the analysis).
    pub fn forecast_hour(&self) -> u32 {
        match self {
            GfsProduct::Analysis => 0,
            GfsProduct::Forecast(hour) => *hour,
        }
    }

    /// Human readable description used in output headers.
    pub fn description(&self) -> String {
        match self {
            GfsProduct::Analysis => "analysis".to_string(),
            GfsProduct::Forecast(hour) => format!("{:03} hour forecast", hour),
        }
    }
}

/// Renders the file-name form used by NOMADS ("anl", "f006").
impl fmt::Display for GfsProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GfsProduct::Analysis => write!(f, "anl"),
            GfsProduct::Forecast(hour) => write!(f, "f{:03}", hour),
        }
    }
}

impl FromStr for GfsProduct {
    type Err = GfsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "anl" {
            return Ok(GfsProduct::Analysis);
        }

        let digits = s
            .strip_prefix('f')
            .filter(|d| !d.is_empty() && d.chars().all(|c| c.is_ascii_digit()))
            .ok_or_else(|| GfsError::InvalidProduct(s.to_string()))?;

        let hour: u32 = digits
            .parse()
            .map_err(|_| GfsError::InvalidProduct(s.to_string()))?;

        GfsProduct::forecast(hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analysis() {
        let product: GfsProduct = "anl".parse().unwrap();
        assert_eq!(product, GfsProduct::Analysis);
        assert_eq!(product.to_string(), "anl");
        assert_eq!(product.description(), "analysis");
        assert_eq!(product.forecast_hour(), 0);
    }

    #[test]
    fn test_parse_forecast() {
        let product: GfsProduct = "f006".parse().unwrap();
        assert_eq!(product, GfsProduct::Forecast(6));
        assert_eq!(product.to_string(), "f006");
        assert_eq!(product.description(), "006 hour forecast");
    }

    #[test]
    fn test_forecast_hour_limits() {
        assert!("f000".parse::<GfsProduct>().is_ok());
        assert!("f120".parse::<GfsProduct>().is_ok());
        assert!("f121".parse::<GfsProduct>().is_err());
        assert!("f123".parse::<GfsProduct>().is_ok());
        assert!("f384".parse::<GfsProduct>().is_ok());
        assert!(matches!(
            "f387".parse::<GfsProduct>(),
            Err(GfsError::InvalidForecastHour { hour: 387, .. })
        ));
    }

    #[test]
    fn test_invalid_product_names() {
        for name in ["", "f", "fxyz", "g006", "analysis", "f-06"] {
            assert!(
                matches!(name.parse::<GfsProduct>(), Err(GfsError::InvalidProduct(_))),
                "{:?} should be rejected",
                name
            );
        }
    }
}
