//! Archival catalog API access.
//!
//! This module holds everything needed to talk to the remote catalog:
//!
//! - [`QueryTarget`] - what to ask for (a parent identifier, a set of
//!   identifiers, or a single identifier)
//! - [`CatalogClient`] - a long-lived HTTP session carrying the API credential
//! - [`PageResponse`] and friends - the explicit response schema
//! - [`PageSource`] - the seam the harvester fetches pages through
//!
//! # Example
//!
//! ```no_run
//! use harvester_core::catalog::{ApiKey, CatalogClient, CatalogConfig, PageSource, QueryTarget};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CatalogConfig::new(ApiKey::new("secret")?);
//! let client = CatalogClient::new(&config)?;
//! let target = QueryTarget::parent("720246")?;
//! let page = client.fetch_page(&target, 1, 100).await?;
//! println!("total hits: {}", page.parsed.total_records());
//! # Ok(())
//! # }
//! ```

mod client;
mod credential;
mod error;
mod schema;
mod target;

pub use client::{
    API_KEY_HEADER, CatalogClient, CatalogConfig, DEFAULT_API_BASE_URL, FetchedPage, PageSource,
};
pub use credential::{API_KEY_ENV_VAR, ApiKey};
pub use error::CatalogError;
pub use schema::{
    Body, DeclaredSize, DigitalObject, Hit, HitSource, HitsSection, PageResponse, Record,
    RecordId, TotalHits,
};
pub use target::QueryTarget;
