//! Per-page snapshot persistence.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracing::info;

use super::HarvestError;

/// Writes raw page payloads under deterministic names.
///
/// Snapshots are named `{label}-metadata-pg{page}of{total}-{YYYYMMDD}.json`
/// and extracted rows `{label}-binaries-{YYYYMMDD}.csv`. The directory is
/// created on the first write, so a query with no hits leaves nothing behind.
#[derive(Debug, Clone)]
pub struct PageStore {
    dir: PathBuf,
    date_stamp: String,
}

impl PageStore {
    /// Store rooted at `dir`, dated today (local time).
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            date_stamp: Local::now().date_naive().format("%Y%m%d").to_string(),
        }
    }

    /// Pins the date used in file names.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date_stamp = date.format("%Y%m%d").to_string();
        self
    }

    /// Snapshot file name for one page.
    #[must_use]
    pub fn snapshot_name(&self, label: &str, page: u64, total_pages: u64) -> String {
        format!(
            "{label}-metadata-pg{page}of{total_pages}-{}.json",
            self.date_stamp
        )
    }

    /// Where the extracted rows of `label` go.
    #[must_use]
    pub fn rows_path(&self, label: &str) -> PathBuf {
        self.dir
            .join(format!("{label}-binaries-{}.csv", self.date_stamp))
    }

    /// Pretty-prints `raw` to the snapshot for `page`, returning its path.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Snapshot`] if the directory or file cannot be
    /// written, and [`HarvestError::SnapshotEncode`] if `raw` cannot be encoded.
    pub async fn persist(
        &self,
        label: &str,
        page: u64,
        total_pages: u64,
        raw: &serde_json::Value,
    ) -> Result<PathBuf, HarvestError> {
        let path = self.dir.join(self.snapshot_name(label, page, total_pages));

        let encoded =
            serde_json::to_vec_pretty(raw).map_err(|source| HarvestError::SnapshotEncode {
                path: path.clone(),
                source,
            })?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| HarvestError::Snapshot {
                path: self.dir.clone(),
                source,
            })?;
        tokio::fs::write(&path, encoded)
            .await
            .map_err(|source| HarvestError::Snapshot {
                path: path.clone(),
                source,
            })?;

        info!(page, total_pages, path = %path.display(), "saved page snapshot");
        Ok(path)
    }
}
