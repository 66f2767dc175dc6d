//! HTTP retrieval with retry and stall detection.
//!
//! NOMADS asks clients to wait 60 s between attempts, so the default delay
//! is fixed at 60 s. The delay doubles after each failure up to
//! `max_retry_delay`, which makes a growing backoff opt-in.

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

/// Configuration for the download manager.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadConfig {
    /// Total number of attempts, including the first
    pub max_attempts: u32,
    /// Delay before the first retry (doubles each retry)
    pub initial_retry_delay: Duration,
    /// Maximum retry delay
    pub max_retry_delay: Duration,
    /// Time allowed to establish a connection
    pub connect_timeout: Duration,
    /// Time allowed between two body chunks before the transfer is
    /// considered stalled
    pub read_timeout: Duration,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            initial_retry_delay: Duration::from_secs(60),
            max_retry_delay: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(15),
            read_timeout: Duration::from_secs(15),
        }
    }
}

/// Fetches request URLs with retry.
pub struct DownloadManager {
    client: Client,
    config: DownloadConfig,
}

impl DownloadManager {
    pub fn new(config: DownloadConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .tcp_nodelay(true)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &DownloadConfig {
        &self.config
    }

    /// Fetch `url`, retrying on transport errors, timeouts and non-200
    /// responses. The error after the last attempt names the URL.
    #[instrument(skip(self), fields(max_attempts = self.config.max_attempts))]
    pub async fn fetch(&self, url: &str) -> Result<Bytes> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut delay = self.config.initial_retry_delay;
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.fetch_once(url).await {
                Ok(body) => {
                    info!(bytes = body.len(), attempt, "Download completed");
                    return Ok(body);
                }
                Err(e) if attempt < max_attempts => {
                    warn!(
                        error = %e,
                        attempt,
                        max_attempts,
                        delay_secs = delay.as_secs_f64(),
                        "Download failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay = std::cmp::min(delay * 2, self.config.max_retry_delay);
                }
                Err(e) => {
                    warn!(error = %e, attempt, "Download failed, giving up");
                    return Err(anyhow!(
                        "Download failed after {} attempts: {}\nFailed URL was: {}",
                        attempt,
                        e,
                        url
                    ));
                }
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<Bytes> {
        let response = tokio::time::timeout(self.config.read_timeout, self.client.get(url).send())
            .await
            .map_err(|_| anyhow!("Connection timed out"))?
            .context("HTTP request failed")?;

        match response.status() {
            StatusCode::OK => {}
            status => return Err(anyhow!("Download failed with status code {}", status.as_u16())),
        }

        let expected = response.content_length();
        let mut body = BytesMut::with_capacity(expected.unwrap_or(0) as usize);
        let mut stream = response.bytes_stream();

        loop {
            let next = tokio::time::timeout(self.config.read_timeout, stream.next())
                .await
                .map_err(|_| anyhow!("Data download timed out"))?;
            match next {
                Some(chunk) => {
                    let chunk = chunk.context("Error reading response chunk")?;
                    body.extend_from_slice(&chunk);
                }
                None => break,
            }
        }

        if let Some(expected) = expected {
            if body.len() as u64 != expected {
                return Err(anyhow!(
                    "Download size mismatch: expected {} bytes, got {}",
                    expected,
                    body.len()
                ));
            }
        }

        debug!(bytes = body.len(), "Received response body");
        Ok(body.freeze())
    }
}

/// Write downloaded bytes to `path`.
pub async fn save_to(path: &Path, body: &[u8]) -> Result<()> {
    let mut file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(body)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.flush().await?;
    info!(path = %path.display(), bytes = body.len(), "Saved GRIB2 subset");
    Ok(())
}
