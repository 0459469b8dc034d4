//! Catalog Harvester Core Library
//!
//! This library walks paginated result sets of an archival catalog API,
//! flattens each record's digital objects into tabular rows, and downloads the
//! referenced assets into date-sequenced run directories.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`catalog`] - Catalog API session, query targets, and response schema
//! - [`harvest`] - Paginated fetch loop, page snapshots, and row extraction
//! - [`rows`] - The flat `naId,title,objectUrl,objectFileSize` row format
//! - [`download`] - Streaming transfers, run directories, and the download engine
//! - [`report`] - Byte sizes, progress lines, and the run summary

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod download;
pub mod harvest;
pub mod report;
pub mod rows;
mod user_agent;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use catalog::{ApiKey, CatalogClient, CatalogConfig, CatalogError, PageSource, QueryTarget};
pub use download::{
    DownloadEngine, DownloadError, DownloadItem, DownloadResult, EngineError, EngineOptions,
    HttpClient, NoopObserver, OutputDirectoryAllocator, TransferObserver,
};
pub use harvest::{
    BatchReport, HarvestError, HarvestOutcome, HarvestReport, PageStore, PaginatedHarvester,
    harvest_batch,
};
pub use report::{RunSummary, format_size};
pub use rows::{AssetRow, RowsError};
