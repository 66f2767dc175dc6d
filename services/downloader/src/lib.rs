//! GFS subset retrieval from NOMADS.

pub mod cli;
pub mod config;
pub mod download;
pub mod request;

use anyhow::Result;
use bytes::Bytes;
use gfs_common::{CycleTime, GfsProduct, GridCell};
use tracing::info;

pub use config::DownloaderConfig;
pub use download::{save_to, DownloadConfig, DownloadManager};
pub use request::{NomadsRequest, DEFAULT_BASE_URL};

/// Build the request for `cycle`/`product` around `cell` and fetch it with
/// the settings in `config`.
pub async fn fetch_subset(
    config: &DownloaderConfig,
    cycle: CycleTime,
    product: GfsProduct,
    cell: GridCell,
) -> Result<Bytes> {
    let request = NomadsRequest::new(cycle, product, cell)
        .with_base_url(config.base_url.clone())
        .with_resolution(config.resolution.clone());

    info!(file = %request.file_name(), cycle = %cycle, "Requesting GFS subset");

    let manager = DownloadManager::new(config.download_config())?;
    manager.fetch(&request.url()).await
}
