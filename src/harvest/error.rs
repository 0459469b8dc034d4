//! Error types for harvesting.

use std::path::PathBuf;

use thiserror::Error;

use crate::rows::RowsError;

/// Errors raised by the harvester outside the page loop itself.
///
/// Page retrieval failures are not errors at this level: they end the loop in
/// a partial state and are reported through
/// [`HarvestOutcome`](super::HarvestOutcome).
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The page size was zero.
    #[error("page limit must be at least 1 (got {limit})")]
    InvalidLimit {
        /// The rejected limit.
        limit: u32,
    },

    /// A snapshot or its directory could not be written.
    #[error("cannot write page snapshot {path}: {source}")]
    Snapshot {
        /// Snapshot path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A page could not be serialized for its snapshot.
    #[error("cannot encode page snapshot {path}: {source}")]
    SnapshotEncode {
        /// Snapshot path.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The extracted rows could not be written.
    #[error(transparent)]
    Rows(#[from] RowsError),
}
