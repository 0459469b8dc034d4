//! Paginated harvesting: fetch every page of a query, persist each one, and
//! flatten the records into asset rows.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use harvester_core::catalog::{ApiKey, CatalogClient, CatalogConfig, QueryTarget};
//! use harvester_core::harvest::{PageStore, PaginatedHarvester};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CatalogClient::new(&CatalogConfig::new(ApiKey::from_env()?))?;
//! let harvester = PaginatedHarvester::new(Arc::new(client), PageStore::new("results"), 100)?;
//! let report = harvester.harvest(&QueryTarget::parent("720246")?).await;
//! println!("{} rows from {} pages", report.row_count(), report.pages_retrieved);
//! # Ok(())
//! # }
//! ```

mod batch;
mod error;
mod extractor;
mod harvester;
mod page_store;

pub use batch::{BatchReport, TargetHarvest, harvest_batch};
pub use error::HarvestError;
pub use extractor::{count_rows, extract_rows};
pub use harvester::{HarvestOutcome, HarvestReport, HarvestState, PaginatedHarvester, total_pages};
pub use page_store::PageStore;
