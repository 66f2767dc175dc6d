//! gfs-cycle: model cycle arithmetic for scripting downloads.
//!
//! Results are printed without a trailing newline so they can be spliced
//! straight into other command lines.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use gfs_common::time::{hours, parse_cycle_date};
use gfs_common::{CycleTime, ModelCycle, ValidTime};

use gfs_downloader::cli::{init_tracing, parse_cycle};

#[derive(Parser, Debug)]
#[command(name = "gfs-cycle")]
#[command(about = "GFS production cycle and forecast timestamp tools")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Most recent cycle expected on the server: "yyyymmdd hh"
    Latest {
        /// Production lag [h]
        #[arg(long, env = "GFS_PRODUCTION_LAG", default_value_t = 6.0, value_parser = parse_hours)]
        lag: f64,
    },

    /// Cycle containing DATE + HOUR + OFFSET hours: "yyyymmdd hh"
    #[command(allow_negative_numbers = true)]
    Relative {
        /// Reference date (YYYYMMDD)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
        /// Reference hour [UT]
        #[arg(value_parser = parse_hours)]
        hour: f64,
        /// Offset [h], may be negative or fractional
        #[arg(value_parser = parse_hours)]
        offset: f64,
    },

    /// Valid time of a forecast: "YYYYMMDD_HH:00:00"
    Timestamp {
        /// Production date (YYYYMMDD)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
        /// Production cycle (0, 6, 12 or 18)
        #[arg(value_parser = parse_cycle)]
        cycle: ModelCycle,
        /// Forecast hour
        forecast_hour: u32,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    parse_cycle_date(s).map_err(|e| e.to_string())
}

/// A finite number of hours that fits in a duration.
fn parse_hours(s: &str) -> Result<f64, String> {
    let h: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("not a number: {s}"))?;
    match hours(h) {
        Some(_) => Ok(h),
        None => Err(format!("hours out of range: {s}")),
    }
}

fn out_of_range(what: &str) -> clap::Error {
    Args::command().error(
        ErrorKind::ValueValidation,
        format!("{what} falls outside the supported calendar"),
    )
}

impl Command {
    /// Out-of-range results are reported as usage errors.
    fn run(&self, now: DateTime<Utc>) -> Result<String, clap::Error> {
        match *self {
            Command::Latest { lag } => hours(lag)
                .and_then(|lag| CycleTime::latest_available(now, lag))
                .map(|cycle| cycle.to_string())
                .ok_or_else(|| out_of_range("now minus --lag")),
            Command::Relative { date, hour, offset } => CycleTime::relative(date, hour, offset)
                .map(|cycle| cycle.to_string())
                .ok_or_else(|| out_of_range("DATE + HOUR + OFFSET")),
            Command::Timestamp {
                date,
                cycle,
                forecast_hour,
            } => {
                let reference = CycleTime::new(date, cycle).reference_time();
                Ok(ValidTime::new(reference, forecast_hour).summary_timestamp())
            }
        }
    }
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level)?;

    match args.command.run(Utc::now()) {
        Ok(output) => print!("{output}"),
        Err(err) => err.exit(),
    }
    Ok(())
}
