//! Model cycle and valid time handling for GFS products.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GfsError, GfsResult};

/// First production date available from the NOMADS GFS archive.
pub fn earliest_archive_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Parse a production date given as `YYYYMMDD` (or ISO `YYYY-MM-DD`).
///
/// Field widths are fixed: chrono alone would accept `2024011` as 2024-01-01.
pub fn parse_cycle_date(s: &str) -> GfsResult<NaiveDate> {
    let invalid = || GfsError::InvalidDate(s.to_string());
    let bytes = s.as_bytes();

    let format = match bytes.len() {
        8 if bytes.iter().all(u8::is_ascii_digit) => "%Y%m%d",
        10 if bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit()) =>
        {
            "%Y-%m-%d"
        }
        _ => return Err(invalid()),
    };

    NaiveDate::parse_from_str(s, format).map_err(|_| invalid())
}

/// Reject production dates older than the archive.
pub fn validate_archive_date(date: NaiveDate) -> GfsResult<NaiveDate> {
    if date < earliest_archive_date() {
        Err(GfsError::DateTooEarly(date))
    } else {
        Ok(date)
    }
}

/// Convert fractional hours to a duration (millisecond resolution).
///
/// `None` when `h` is not finite or does not fit in a `Duration`.
pub fn hours(h: f64) -> Option<Duration> {
    let ms = (h * 3_600_000.0).round();
    if !ms.is_finite() || ms.abs() >= i64::MAX as f64 {
        return None;
    }
    Duration::try_milliseconds(ms as i64)
}

/// Model run cycles (GFS runs 4x daily).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelCycle {
    /// 00Z run
    Z00,
    /// 06Z run
    Z06,
    /// 12Z run
    Z12,
    /// 18Z run
    Z18,
}

impl ModelCycle {
    pub fn from_hour(hour: u32) -> Option<Self> {
        match hour {
            0 => Some(ModelCycle::Z00),
            6 => Some(ModelCycle::Z06),
            12 => Some(ModelCycle::Z12),
            18 => Some(ModelCycle::Z18),
            _ => None,
        }
    }

    /// Validated conversion for user input.
    pub fn try_from_hour(hour: u32) -> GfsResult<Self> {
        Self::from_hour(hour).ok_or(GfsError::InvalidCycle(hour))
    }

    /// The cycle whose run hour is the largest multiple of 6 not after `hour`.
    pub fn containing_hour(hour: u32) -> Self {
        match hour {
            0..=5 => ModelCycle::Z00,
            6..=11 => ModelCycle::Z06,
            12..=17 => ModelCycle::Z12,
            _ => ModelCycle::Z18,
        }
    }

    pub fn hour(&self) -> u32 {
        match self {
            ModelCycle::Z00 => 0,
            ModelCycle::Z06 => 6,
            ModelCycle::Z12 => 12,
            ModelCycle::Z18 => 18,
        }
    }
}

/// A production cycle: date plus run hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CycleTime {
    pub date: NaiveDate,
    pub cycle: ModelCycle,
}

impl CycleTime {
    pub fn new(date: NaiveDate, cycle: ModelCycle) -> Self {
        Self { date, cycle }
    }

    /// The cycle a given instant falls in (hour floored to a multiple of 6).
    pub fn containing(dt: DateTime<Utc>) -> Self {
        Self {
            date: dt.date_naive(),
            cycle: ModelCycle::containing_hour(dt.hour()),
        }
    }

    /// Most recent cycle expected to be published, given the production lag.
    ///
    /// `None` when `now - production_lag` is outside the representable range.
    pub fn latest_available(now: DateTime<Utc>, production_lag: Duration) -> Option<Self> {
        now.checked_sub_signed(production_lag).map(Self::containing)
    }

    /// Cycle displaced from `hour` UT on `date` by `offset_hours`.
    ///
    /// Neither `hour` nor the result need to line up with a cycle before
    /// flooring; fractional hours are accepted. `None` when the displaced
    /// instant is out of range.
    pub fn relative(date: NaiveDate, hour: f64, offset_hours: f64) -> Option<Self> {
        let midnight = Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN));
        midnight
            .checked_add_signed(hours(hour + offset_hours)?)
            .map(Self::containing)
    }

    /// Model run/reference time.
    pub fn reference_time(&self) -> DateTime<Utc> {
        let midnight = Utc.from_utc_datetime(&self.date.and_time(chrono::NaiveTime::MIN));
        midnight + Duration::hours(self.cycle.hour() as i64)
    }

    /// Production date in the `YYYYMMDD` form NOMADS uses.
    pub fn date_string(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }
}

/// Renders `yyyymmdd hh`.
impl fmt::Display for CycleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}", self.date_string(), self.cycle.hour())
    }
}

/// Represents a valid time for meteorological data.
///
/// Combines reference time (model run time) and forecast offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidTime {
    /// Model run/reference time
    pub reference_time: DateTime<Utc>,
    /// Forecast hour offset from reference time
    pub forecast_hour: u32,
}

impl ValidTime {
    pub fn new(reference_time: DateTime<Utc>, forecast_hour: u32) -> Self {
        Self {
            reference_time,
            forecast_hour,
        }
    }

    /// Calculate the actual valid time (reference + forecast offset)
    pub fn valid_datetime(&self) -> DateTime<Utc> {
        self.reference_time + Duration::hours(self.forecast_hour as i64)
    }

    /// Timestamp used as the key column of forecast summary files.
    pub fn summary_timestamp(&self) -> String {
        self.valid_datetime().format("%Y%m%d_%H:00:00").to_string()
    }
}
