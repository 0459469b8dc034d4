//! Units of work consumed by the engine and the outcomes it records.

use std::path::PathBuf;

/// One asset to retrieve.
///
/// `ordinal` is the 1-based position of the source row and is stable across
/// the run; failures are reported against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadItem {
    /// 1-based source row position.
    pub ordinal: usize,
    /// Owning record identifier.
    pub record_id: String,
    /// Owning record title.
    pub title: String,
    /// Asset URL; empty means there is nothing to fetch.
    pub url: String,
    /// Size declared by the catalog, in bytes.
    pub declared_size: u64,
}

impl DownloadItem {
    /// Whether the item has a URL to fetch.
    #[must_use]
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// Outcome of attempting one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    /// The attempted item.
    pub item: DownloadItem,
    /// Whether the transfer completed.
    pub succeeded: bool,
    /// Failure description, when the transfer failed.
    pub error: Option<String>,
    /// Bytes written to disk.
    pub bytes_received: u64,
    /// Destination file.
    pub path: Option<PathBuf>,
}

impl DownloadResult {
    /// A completed transfer.
    #[must_use]
    pub fn success(item: DownloadItem, bytes_received: u64, path: PathBuf) -> Self {
        Self {
            item,
            succeeded: true,
            error: None,
            bytes_received,
            path: Some(path),
        }
    }

    /// A failed transfer. `path` is where a partial file may have been left.
    #[must_use]
    pub fn failure(item: DownloadItem, error: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self {
            item,
            succeeded: false,
            error: Some(error.into()),
            bytes_received: 0,
            path,
        }
    }
}
