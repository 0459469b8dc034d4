//! Harvesting several query targets, each an independent unit of failure.

use std::path::PathBuf;

use tracing::{error, info};

use super::harvester::{HarvestReport, PaginatedHarvester};
use crate::catalog::QueryTarget;
use crate::rows::{AssetRow, write_rows};

/// Outcome of one target in a batch.
#[derive(Debug, Clone)]
pub struct TargetHarvest {
    /// The harvest itself.
    pub report: HarvestReport,
    /// Rows extracted from the retrieved pages.
    pub rows: Vec<AssetRow>,
    /// Row file written for this target, if any page was retrieved.
    pub rows_file: Option<PathBuf>,
    /// Why the row file could not be written.
    pub write_error: Option<String>,
}

impl TargetHarvest {
    /// Whether this target ended anywhere short of complete-or-empty.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.report.is_partial() || self.write_error.is_some()
    }

    /// One-line operator summary.
    #[must_use]
    pub fn summary_line(&self) -> String {
        let report = &self.report;
        let mut line = format!(
            "{}: {} - {}/{} pages, {} hits, {} rows",
            report.target,
            report.status_label(),
            report.pages_retrieved,
            report.total_pages,
            report.hits.len(),
            self.rows.len()
        );
        if let Some(path) = &self.rows_file {
            line.push_str(&format!(" -> {}", path.display()));
        }
        if let Some(error) = &self.write_error {
            line.push_str(&format!(" (rows not written: {error})"));
        }
        line
    }
}

/// Results of a whole batch, in target order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// One entry per target.
    pub targets: Vec<TargetHarvest>,
}

impl BatchReport {
    /// Whether any target ended early or failed to write its rows.
    #[must_use]
    pub fn has_partial(&self) -> bool {
        self.targets.iter().any(TargetHarvest::is_partial)
    }

    /// Every extracted row across all targets, in target order.
    #[must_use]
    pub fn all_rows(&self) -> Vec<AssetRow> {
        self.targets
            .iter()
            .flat_map(|target| target.rows.iter().cloned())
            .collect()
    }
}

/// Harvests each target in turn and writes its row file.
///
/// A failing target never stops the batch. The row file is written whenever
/// at least one page of the target was retrieved, header included even if
/// the pages held no assets.
pub async fn harvest_batch(harvester: &PaginatedHarvester, targets: &[QueryTarget]) -> BatchReport {
    let mut batch = BatchReport::default();

    for (index, target) in targets.iter().enumerate() {
        info!(
            query = %target,
            position = index + 1,
            total = targets.len(),
            "harvesting target"
        );
        let report = harvester.harvest(target).await;
        let rows = report.rows();

        let (rows_file, write_error) = if report.pages_retrieved > 0 {
            let path = harvester.store().rows_path(&target.label());
            match write_rows(&path, &rows) {
                Ok(written) => {
                    info!(path = %path.display(), rows = written, "wrote row file");
                    (Some(path), None)
                }
                Err(e) => {
                    error!(query = %target, error = %e, "failed to write row file");
                    (None, Some(e.to_string()))
                }
            }
        } else {
            (None, None)
        };

        batch.targets.push(TargetHarvest {
            report,
            rows,
            rows_file,
            write_error,
        });
    }

    batch
}
