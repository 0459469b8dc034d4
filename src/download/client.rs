//! HTTP client wrapper for streaming asset transfers.
//!
//! This module provides the `HttpClient` struct which streams one response
//! body to one destination file, reporting progress after every chunk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::{DownloadError, EngineError};
use super::progress::TransferObserver;
use crate::user_agent;

/// HTTP client for downloading files with streaming support.
///
/// This client is designed to be created once per run and reused for every
/// item, taking advantage of connection pooling.
///
/// # Example
///
/// ```no_run
/// use harvester_core::download::{HttpClient, NoopObserver};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new()?;
/// let transfer = client
///     .download_to_path("https://example.com/file.pdf", Path::new("./file.pdf"), &mut NoopObserver)
///     .await?;
/// println!("received {} bytes", transfer.bytes_received);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

/// Result of one completed transfer.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// Destination file.
    pub path: PathBuf,
    /// Bytes written.
    pub bytes_received: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes without a single byte arriving
    /// - Gzip decompression: enabled
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ClientBuild`] if reqwest rejects the configuration.
    pub fn new() -> Result<Self, EngineError> {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ClientBuild`] if reqwest rejects the configuration.
    pub fn new_with_timeouts(
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, EngineError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .read_timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(EngineError::ClientBuild)?;
        Ok(Self { client })
    }

    /// Streams `url` into `dest`, calling `observer.on_progress` after every chunk.
    ///
    /// Each chunk is written as soon as it arrives; the body is never held in
    /// memory. A partially written file is left in place when the transfer fails.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - The server returns an error status (4xx, 5xx)
    /// - Creating or writing the file fails
    #[must_use = "transfer outcome carries the byte count"]
    #[instrument(skip(self, observer), fields(url = %url, dest = %dest.display()))]
    pub async fn download_to_path(
        &self,
        url: &str,
        dest: &Path,
        observer: &mut dyn TransferObserver,
    ) -> Result<TransferOutcome, DownloadError> {
        debug!("starting download");

        let parsed_url =
            Url::parse(url.trim()).map_err(|_| DownloadError::invalid_url(url.to_string()))?;

        let response = self
            .client
            .get(parsed_url)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        let content_length = response.content_length().filter(|len| *len > 0);

        let mut file = File::create(dest)
            .await
            .map_err(|e| DownloadError::io(dest.to_path_buf(), e))?;

        let bytes_received =
            stream_to_file(&mut file, response, url, dest, content_length, observer).await?;

        info!(
            path = %dest.display(),
            bytes = bytes_received,
            "download complete"
        );

        Ok(TransferOutcome {
            path: dest.to_path_buf(),
            bytes_received,
        })
    }

}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
    content_length: Option<u64>,
    observer: &mut dyn TransferObserver,
) -> Result<u64, DownloadError> {
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = match chunk_result {
            Ok(chunk) => chunk,
            Err(e) => {
                // Keep what arrived so the partial file reflects every byte received.
                let _ = file.flush().await;
                return Err(DownloadError::network(url, e));
            }
        };
        if chunk.is_empty() {
            continue;
        }

        file.write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
        observer.on_progress(bytes_written, content_length);
    }

    file.flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
