//! Sequential download engine.
//!
//! The engine walks an ordered list of [`DownloadItem`]s, transferring one at a
//! time into a single run directory obtained from an
//! [`OutputDirectoryAllocator`]. Per-item failures are converted into report
//! data; only the failure to obtain the run directory stops a run.
//!
//! # Example
//!
//! ```no_run
//! use harvester_core::download::{
//!     DownloadEngine, EngineOptions, HttpClient, NoopObserver, OutputDirectoryAllocator,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = DownloadEngine::new(HttpClient::new()?, EngineOptions::default());
//! let allocator = OutputDirectoryAllocator::new("./downloads");
//! let summary = engine.run(Vec::new(), &allocator, &mut NoopObserver).await?;
//! println!("{}", summary.render());
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use super::error::EngineError;
use super::filename::destination_filename;
use super::item::{DownloadItem, DownloadResult};
use super::output_dir::OutputDirectoryAllocator;
use super::progress::TransferObserver;
use super::HttpClient;
use crate::report::RunSummary;

/// Tunables for one engine run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Pause between consecutive attempted items.
    pub item_delay: Option<Duration>,
}

impl EngineOptions {
    /// Options with an inter-item delay in milliseconds; `0` disables it.
    #[must_use]
    pub fn with_delay_ms(delay_ms: u64) -> Self {
        Self {
            item_delay: (delay_ms > 0).then(|| Duration::from_millis(delay_ms)),
        }
    }
}

/// Downloads items one at a time, in input order.
///
/// An item with no URL is skipped: it is logged and counted, but it is not an
/// attempt and it does not incur the inter-item delay. Every other item is
/// attempted exactly once, regardless of how earlier items fared.
#[derive(Debug)]
pub struct DownloadEngine {
    client: HttpClient,
    options: EngineOptions,
}

impl DownloadEngine {
    /// Creates an engine around a download session that lives for the whole run.
    #[must_use]
    pub fn new(client: HttpClient, options: EngineOptions) -> Self {
        Self { client, options }
    }

    /// Options this engine was built with.
    #[must_use]
    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Allocates the run directory once, then downloads every item into it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] only when the run directory cannot be allocated.
    /// Item failures are recorded in the returned [`RunSummary`].
    pub async fn run(
        &self,
        items: Vec<DownloadItem>,
        allocator: &OutputDirectoryAllocator,
        observer: &mut dyn TransferObserver,
    ) -> Result<RunSummary, EngineError> {
        let output_dir = allocator.allocate().await?;
        Ok(self.run_in_dir(items, &output_dir, observer).await)
    }

    /// Downloads every item into an existing directory.
    #[instrument(skip(self, items, observer), fields(output_dir = %output_dir.display(), items = items.len()))]
    pub async fn run_in_dir(
        &self,
        items: Vec<DownloadItem>,
        output_dir: &Path,
        observer: &mut dyn TransferObserver,
    ) -> RunSummary {
        let total = items.len();
        let declared: u64 = items.iter().map(|item| item.declared_size).sum();
        let mut summary = RunSummary::start(total, declared);
        summary.output_dir = Some(output_dir.to_path_buf());

        info!(total, declared_bytes = declared, "starting download run");

        let mut attempted_before = false;
        for (index, item) in items.into_iter().enumerate() {
            let position = index + 1;

            if !item.has_url() {
                info!(ordinal = item.ordinal, "item has no objectUrl, skipping");
                observer.on_item_skipped(&item, position, total);
                summary.record_skip();
                continue;
            }

            if attempted_before && let Some(delay) = self.options.item_delay {
                debug!(delay_ms = delay.as_millis(), "waiting before next item");
                tokio::time::sleep(delay).await;
            }
            attempted_before = true;

            let result = self
                .download_item(item, output_dir, position, total, observer)
                .await;
            observer.on_item_finish(&result);
            summary.record(result);
        }

        summary.finish();
        info!(
            attempted = summary.attempted,
            succeeded = summary.succeeded,
            failed = summary.failed(),
            skipped = summary.skipped,
            "download run finished"
        );
        summary
    }

    async fn download_item(
        &self,
        item: DownloadItem,
        output_dir: &Path,
        position: usize,
        total: usize,
        observer: &mut dyn TransferObserver,
    ) -> DownloadResult {
        let filename = destination_filename(&item);
        let dest = output_dir.join(&filename);

        observer.on_item_start(&item, position, total, &filename);
        info!(
            ordinal = item.ordinal,
            position,
            total,
            remaining = total - position,
            file = %filename,
            "downloading"
        );

        match self
            .client
            .download_to_path(&item.url, &dest, &mut *observer)
            .await
        {
            Ok(outcome) => DownloadResult::success(item, outcome.bytes_received, outcome.path),
            Err(error) => {
                warn!(ordinal = item.ordinal, url = %item.url, error = %error, "download failed");
                let partial = tokio::fs::try_exists(&dest)
                    .await
                    .unwrap_or(false)
                    .then_some(dest);
                DownloadResult::failure(item, error.to_string(), partial)
            }
        }
    }
}
