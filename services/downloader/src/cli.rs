//! Command-line helpers shared by the GFS binaries.
//!
//! The parsers plug into clap's `value_parser`, so a bad argument becomes a
//! usage error (exit status 2) before any work starts.

use anyhow::Result;
use chrono::NaiveDate;
use gfs_common::site::{validate_altitude, validate_latitude, validate_longitude};
use gfs_common::time::{parse_cycle_date, validate_archive_date};
use gfs_common::{GfsProduct, ModelCycle};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn number(s: &str) -> Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| format!("not a number: {s}"))
}

pub fn parse_latitude(s: &str) -> Result<f64, String> {
    validate_latitude(number(s)?).map_err(|e| e.to_string())
}

pub fn parse_longitude(s: &str) -> Result<f64, String> {
    validate_longitude(number(s)?).map_err(|e| e.to_string())
}

pub fn parse_altitude(s: &str) -> Result<f64, String> {
    validate_altitude(number(s)?).map_err(|e| e.to_string())
}

/// `YYYYMMDD`, not before the start of the archive.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    parse_cycle_date(s)
        .and_then(validate_archive_date)
        .map_err(|e| e.to_string())
}

pub fn parse_cycle(s: &str) -> Result<ModelCycle, String> {
    let hour: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("not an hour: {s}"))?;
    ModelCycle::try_from_hour(hour).map_err(|e| e.to_string())
}

/// `anl` or `fNNN`.
pub fn parse_product(s: &str) -> Result<GfsProduct, String> {
    s.parse().map_err(|e: gfs_common::GfsError| e.to_string())
}

fn level_from_str(log_level: &str) -> Level {
    match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Install the global subscriber. Logs go to stderr; stdout is reserved for
/// program output.
pub fn init_tracing(log_level: &str) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_from_str(log_level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_bounds() {
        assert_eq!(parse_latitude("90").unwrap(), 90.0);
        assert_eq!(parse_latitude("-90.0").unwrap(), -90.0);
        assert!(parse_latitude("90.01").is_err());
        assert_eq!(parse_longitude("-180").unwrap(), -180.0);
        assert!(parse_longitude("180.5").is_err());
        assert!(parse_latitude("north").is_err());
    }

    #[test]
    fn test_altitude_bounds() {
        assert_eq!(parse_altitude("-500").unwrap(), -500.0);
        assert_eq!(parse_altitude("4080").unwrap(), 4080.0);
        assert!(parse_altitude("-500.1").is_err());
        assert!(parse_altitude("NaN").is_err());
    }

    #[test]
    fn test_date_bounds() {
        assert_eq!(
            parse_date("20170101").unwrap(),
            NaiveDate::from_ymd_opt(2017, 1, 1).unwrap()
        );
        assert!(parse_date("20161231").is_err());
        assert!(parse_date("20240230").is_err());
        assert!(parse_date("2024011").is_err());
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn test_cycle_values() {
        assert_eq!(parse_cycle("0").unwrap(), ModelCycle::Z00);
        assert_eq!(parse_cycle("18").unwrap(), ModelCycle::Z18);
        assert!(parse_cycle("3").is_err());
        assert!(parse_cycle("24").is_err());
    }

    #[test]
    fn test_product_values() {
        assert_eq!(parse_product("anl").unwrap(), GfsProduct::Analysis);
        assert_eq!(parse_product("f6").unwrap(), GfsProduct::Forecast(6));
        assert_eq!(parse_product("f384").unwrap(), GfsProduct::Forecast(384));
        assert!(parse_product("f121").is_err());
        assert!(parse_product("f387").is_err());
        assert!(parse_product("006").is_err());
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!(level_from_str("DEBUG"), Level::DEBUG);
        assert_eq!(level_from_str("bogus"), Level::WARN);
    }
}
