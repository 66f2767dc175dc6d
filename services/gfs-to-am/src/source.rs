//! Where the GRIB2 subset comes from.

use std::path::PathBuf;

use anyhow::{Context, Result};
use gfs_common::{CycleTime, GfsProduct, GridCell};
use gfs_downloader::{fetch_subset, save_to, DownloaderConfig};
use tracing::debug;

/// The GRIB2 subset bytes, from a local file or from NOMADS. A downloaded
/// subset is also written to `save_grib` when given.
pub async fn load_subset(
    grib_file: Option<&PathBuf>,
    save_grib: Option<&PathBuf>,
    config: &DownloaderConfig,
    cycle: CycleTime,
    product: GfsProduct,
    cell: GridCell,
) -> Result<Vec<u8>> {
    if let Some(path) = grib_file {
        debug!(path = %path.display(), "Reading local GRIB2 subset");
        return tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read GRIB2 file: {}", path.display()));
    }

    let body = fetch_subset(config, cycle, product, cell).await?;
    if let Some(path) = save_grib {
        save_to(path, &body).await?;
    }
    Ok(body.to_vec())
}
