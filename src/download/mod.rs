//! Asset download: streaming transfers, file naming, run directories, and the engine.
//!
//! # Features
//!
//! - Streaming downloads (each chunk goes straight to disk)
//! - Collision-free `{YYYYMMDD}-{N}` run directories
//! - `{recordId}_{basename}` file names, with a `file_{ordinal}` fallback
//! - Progress reported through [`TransferObserver`]
//! - Per-item failures recorded, never fatal
//!
//! # Example
//!
//! ```no_run
//! use harvester_core::download::{
//!     DownloadEngine, DownloadItem, EngineOptions, HttpClient, NoopObserver,
//!     OutputDirectoryAllocator,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let items = vec![DownloadItem {
//!     ordinal: 1,
//!     record_id: "12345".to_string(),
//!     title: "Map of the harbor".to_string(),
//!     url: "https://example.com/0001.jpg".to_string(),
//!     declared_size: 2048,
//! }];
//! let engine = DownloadEngine::new(HttpClient::new()?, EngineOptions::with_delay_ms(500));
//! let summary = engine
//!     .run(items, &OutputDirectoryAllocator::new("./downloads"), &mut NoopObserver)
//!     .await?;
//! println!("{}", summary.render());
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod engine;
mod error;
mod filename;
mod item;
mod output_dir;
mod progress;

pub use client::{HttpClient, TransferOutcome};
pub use constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
pub use engine::{DownloadEngine, EngineOptions};
pub use error::{DownloadError, EngineError};
pub use filename::{destination_filename, sanitize_filename, url_basename};
pub use item::{DownloadItem, DownloadResult};
pub use output_dir::OutputDirectoryAllocator;
pub use progress::{NoopObserver, TransferObserver};
