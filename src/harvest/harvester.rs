//! The paginated fetch loop, modelled as an explicit state machine.
//!
//! ```text
//! Fetching(1) --total = 0-----------------> Done(Empty)
//! Fetching(p) --fetch/parse/persist error--> Done(Partial)
//! Fetching(p) --p < total_pages-----------> Fetching(p + 1)
//! Fetching(p) --p = total_pages-----------> Done(Complete)
//! ```
//!
//! The page count is computed once, from page 1, and never recomputed.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use super::HarvestError;
use super::extractor::{count_rows, extract_rows};
use super::page_store::PageStore;
use crate::catalog::{Hit, PageSource, QueryTarget};
use crate::rows::AssetRow;

/// Where the fetch loop is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestState {
    /// About to fetch this page.
    Fetching {
        /// 1-based page number.
        page: u64,
    },
    /// The loop has ended.
    Done(HarvestOutcome),
}

/// How a harvest ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestOutcome {
    /// Every page was retrieved.
    Complete,
    /// Page 1 reported zero hits.
    Empty,
    /// The loop stopped early; everything before `failed_page` is kept.
    Partial {
        /// The page that could not be retrieved or persisted.
        failed_page: u64,
        /// What went wrong.
        reason: String,
    },
}

/// Everything one harvest produced.
#[derive(Debug, Clone)]
pub struct HarvestReport {
    /// The harvested target.
    pub target: QueryTarget,
    /// How the loop ended.
    pub outcome: HarvestOutcome,
    /// Total hits reported by page 1.
    pub total_records: u64,
    /// Page count fixed from page 1.
    pub total_pages: u64,
    /// Pages fetched and persisted.
    pub pages_retrieved: u64,
    /// Accumulated hits, in page order.
    pub hits: Vec<Hit>,
    /// Snapshot files written, in page order.
    pub snapshots: Vec<std::path::PathBuf>,
}

impl HarvestReport {
    fn new(target: QueryTarget) -> Self {
        Self {
            target,
            outcome: HarvestOutcome::Complete,
            total_records: 0,
            total_pages: 0,
            pages_retrieved: 0,
            hits: Vec::new(),
            snapshots: Vec::new(),
        }
    }

    /// Flattened rows of every retrieved page, in order.
    #[must_use]
    pub fn rows(&self) -> Vec<AssetRow> {
        extract_rows(&self.hits).collect()
    }

    /// Number of rows [`HarvestReport::rows`] would return.
    #[must_use]
    pub fn row_count(&self) -> usize {
        count_rows(&self.hits)
    }

    /// Whether the loop stopped before the last page.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        matches!(self.outcome, HarvestOutcome::Partial { .. })
    }

    /// `complete`, `empty`, `partial`, or `failed` (nothing retrieved at all).
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        status_label(&self.outcome, self.pages_retrieved)
    }
}

/// `ceil(total_records / limit)`; zero when `limit` is zero.
#[must_use]
pub fn total_pages(total_records: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total_records.div_ceil(u64::from(limit))
}

/// Walks every page of a query target, persisting and accumulating as it goes.
pub struct PaginatedHarvester {
    source: Arc<dyn PageSource>,
    store: PageStore,
    limit: u32,
}

impl std::fmt::Debug for PaginatedHarvester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedHarvester")
            .field("store", &self.store)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl PaginatedHarvester {
    /// Creates a harvester fetching `limit` records per page.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::InvalidLimit`] when `limit` is zero.
    pub fn new(
        source: Arc<dyn PageSource>,
        store: PageStore,
        limit: u32,
    ) -> Result<Self, HarvestError> {
        if limit == 0 {
            return Err(HarvestError::InvalidLimit { limit });
        }
        Ok(Self {
            source,
            store,
            limit,
        })
    }

    /// Snapshot store in use.
    #[must_use]
    pub fn store(&self) -> &PageStore {
        &self.store
    }

    /// Runs the fetch loop for `target` to a terminal state.
    ///
    /// Never fails as a whole: a page that cannot be retrieved, parsed, or
    /// persisted ends the loop in [`HarvestOutcome::Partial`] with every
    /// earlier page kept.
    #[instrument(skip(self, target), fields(query = %target, limit = self.limit))]
    pub async fn harvest(&self, target: &QueryTarget) -> HarvestReport {
        let mut report = HarvestReport::new(target.clone());
        let mut state = HarvestState::Fetching { page: 1 };

        loop {
            state = match state {
                HarvestState::Fetching { page } => self.step(target, page, &mut report).await,
                HarvestState::Done(outcome) => {
                    info!(
                        status = status_label(&outcome, report.pages_retrieved),
                        pages = report.pages_retrieved,
                        total_pages = report.total_pages,
                        hits = report.hits.len(),
                        "harvest finished"
                    );
                    report.outcome = outcome;
                    return report;
                }
            };
        }
    }

    async fn step(&self, target: &QueryTarget, page: u64, report: &mut HarvestReport) -> HarvestState {
        if page == 1 {
            info!("fetching first page");
        } else {
            info!(page, total_pages = report.total_pages, "fetching page");
        }

        let fetched = match self.source.fetch_page(target, page, self.limit).await {
            Ok(fetched) => fetched,
            Err(e) => {
                error!(
                    page,
                    error = %e,
                    body = e.response_body().unwrap_or_default(),
                    "failed to retrieve page"
                );
                return HarvestState::Done(HarvestOutcome::Partial {
                    failed_page: page,
                    reason: e.to_string(),
                });
            }
        };

        let reported_total = fetched.parsed.total_records();
        if page == 1 {
            if reported_total == 0 {
                warn!("no records found (total = 0)");
                return HarvestState::Done(HarvestOutcome::Empty);
            }
            report.total_records = reported_total;
            report.total_pages = total_pages(reported_total, self.limit);
            info!(
                total_records = reported_total,
                total_pages = report.total_pages,
                "page count fixed from first page"
            );
        } else if fetched.parsed.has_total() && reported_total != report.total_records {
            debug!(
                page,
                first_page_total = report.total_records,
                reported_total,
                "later page reports a different total; keeping the first"
            );
        }

        let label = target.label();
        match self
            .store
            .persist(&label, page, report.total_pages, &fetched.raw)
            .await
        {
            Ok(path) => report.snapshots.push(path),
            Err(e) => {
                error!(page, error = %e, "failed to persist page snapshot");
                return HarvestState::Done(HarvestOutcome::Partial {
                    failed_page: page,
                    reason: e.to_string(),
                });
            }
        }

        report.pages_retrieved += 1;
        report.hits.extend(fetched.parsed.into_hits());

        if page >= report.total_pages {
            HarvestState::Done(HarvestOutcome::Complete)
        } else {
            HarvestState::Fetching { page: page + 1 }
        }
    }
}

fn status_label(outcome: &HarvestOutcome, pages_retrieved: u64) -> &'static str {
    match outcome {
        HarvestOutcome::Complete => "complete",
        HarvestOutcome::Empty => "empty",
        HarvestOutcome::Partial { .. } if pages_retrieved == 0 => "failed",
        HarvestOutcome::Partial { .. } => "partial",
    }
}
