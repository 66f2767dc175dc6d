//! Downloader settings.
//!
//! Settings come from an optional YAML file; every key falls back to the
//! NOMADS defaults when omitted.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use gfs_common::GridResolution;
use serde::Deserialize;
use tracing::debug;

use crate::download::DownloadConfig;
use crate::request::DEFAULT_BASE_URL;

/// Root of the downloader YAML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DownloaderConfig {
    /// NOMADS server
    pub base_url: String,
    /// Lat/lon grid code, e.g. `0p25`
    pub resolution: GridResolution,
    /// Total attempts per request
    pub max_attempts: u32,
    pub retry_delay_secs: u64,
    pub max_retry_delay_secs: u64,
    pub connect_timeout_secs: u64,
    /// Stalled-read timeout between body chunks
    pub read_timeout_secs: u64,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        let download = DownloadConfig::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            resolution: GridResolution::default(),
            max_attempts: download.max_attempts,
            retry_delay_secs: download.initial_retry_delay.as_secs(),
            max_retry_delay_secs: download.max_retry_delay.as_secs(),
            connect_timeout_secs: download.connect_timeout.as_secs(),
            read_timeout_secs: download.read_timeout.as_secs(),
        }
    }
}

impl DownloaderConfig {
    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: DownloaderConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), base_url = %config.base_url, "Loaded downloader config");
        Ok(config)
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn download_config(&self) -> DownloadConfig {
        DownloadConfig {
            max_attempts: self.max_attempts,
            initial_retry_delay: Duration::from_secs(self.retry_delay_secs),
            max_retry_delay: Duration::from_secs(self.max_retry_delay_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            read_timeout: Duration::from_secs(self.read_timeout_secs),
        }
    }
}
