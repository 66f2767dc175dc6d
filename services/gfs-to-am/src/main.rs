//! gfs-to-am: fetch a GFS subset around a site and write the column as am
//! layers on stdout.
//!
//! Exit status is 0 on success, 1 when the column cannot be produced
//! (retrieval failure, unreadable GRIB2, site above the model top or missing
//! level data) and 2 for invalid arguments.

mod pipeline;
mod source;

use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use gfs_common::{CycleTime, GfsProduct, GridCell, ModelCycle, Site};
use gfs_grib::GribIndex;

use gfs_downloader::cli::{
    init_tracing, parse_altitude, parse_cycle, parse_date, parse_latitude, parse_longitude,
    parse_product,
};
use gfs_downloader::DownloaderConfig;
use pipeline::{write_site_column, ColumnRequest};
use source::load_subset;

#[derive(Parser, Debug)]
#[command(name = "gfs-to-am")]
#[command(about = "Interpolate GFS model data to a site and write am layers to stdout")]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Site latitude [deg N], -90 to 90
    #[arg(value_parser = parse_latitude)]
    lat: f64,

    /// Site longitude [deg E], -180 to 180
    #[arg(value_parser = parse_longitude)]
    lon: f64,

    /// Site geopotential altitude [m], at least -500
    #[arg(value_parser = parse_altitude)]
    altitude: f64,

    /// Production date (YYYYMMDD)
    #[arg(value_parser = parse_date)]
    gfsdate: NaiveDate,

    /// Production cycle (0, 6, 12 or 18)
    #[arg(value_parser = parse_cycle)]
    gfscycle: ModelCycle,

    /// Product: anl, or fNNN for an NNN hour forecast
    #[arg(value_parser = parse_product)]
    gfsprod: GfsProduct,

    /// Read the GRIB2 subset from this file instead of downloading it
    #[arg(long, conflicts_with = "save_grib")]
    grib_file: Option<PathBuf>,

    /// Keep the downloaded GRIB2 subset in this file
    #[arg(long)]
    save_grib: Option<PathBuf>,

    /// Downloader settings (YAML)
    #[arg(long, env = "GFS_DOWNLOADER_CONFIG")]
    config: Option<PathBuf>,

    /// Override the NOMADS server
    #[arg(long, env = "NOMADS_BASE_URL")]
    base_url: Option<String>,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let mut config = DownloaderConfig::load_or_default(args.config.as_deref())?;
    if let Some(base_url) = args.base_url.clone() {
        config.base_url = base_url;
    }

    let site = Site::new(args.lat, args.lon, args.altitude)?;
    let cycle = CycleTime::new(args.gfsdate, args.gfscycle);
    let cell = GridCell::bracketing(site.latitude, site.longitude, &config.resolution);

    let subset = load_subset(
        args.grib_file.as_ref(),
        args.save_grib.as_ref(),
        &config,
        cycle,
        args.gfsprod,
        cell,
    )
    .await?;

    let index = GribIndex::from_bytes(&subset, &cell).context("Failed to read GRIB2 subset")?;

    let request = ColumnRequest {
        site,
        cycle,
        product: args.gfsprod,
        cell,
    };
    let stdout = io::stdout();
    write_site_column(&index, &request, BufWriter::new(stdout.lock()))?;

    Ok(())
}
