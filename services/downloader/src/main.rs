//! Fetch the GFS isobaric subset around a site and save it as GRIB2.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use gfs_common::{CycleTime, GfsProduct, GridCell, ModelCycle};
use tracing::info;

use gfs_downloader::cli::{
    init_tracing, parse_cycle, parse_date, parse_latitude, parse_longitude, parse_product,
};
use gfs_downloader::{fetch_subset, save_to, DownloaderConfig};

#[derive(Parser, Debug)]
#[command(name = "gfs-download")]
#[command(about = "Download the GFS column variables around a site from NOMADS")]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Site latitude [deg N]
    #[arg(value_parser = parse_latitude)]
    lat: f64,

    /// Site longitude [deg E]
    #[arg(value_parser = parse_longitude)]
    lon: f64,

    /// Production date (YYYYMMDD)
    #[arg(value_parser = parse_date)]
    gfsdate: NaiveDate,

    /// Production cycle (0, 6, 12 or 18)
    #[arg(value_parser = parse_cycle)]
    gfscycle: ModelCycle,

    /// Product: anl, or fNNN for an NNN hour forecast
    #[arg(value_parser = parse_product)]
    gfsprod: GfsProduct,

    /// Where to write the GRIB2 subset
    #[arg(short, long)]
    output: PathBuf,

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
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    let cycle = CycleTime::new(args.gfsdate, args.gfscycle);
    let cell = GridCell::bracketing(args.lat, args.lon, &config.resolution);

    let body = fetch_subset(&config, cycle, args.gfsprod, cell).await?;
    save_to(&args.output, &body).await?;

    info!(output = %args.output.display(), "Download complete");
    Ok(())
}
