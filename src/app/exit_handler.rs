//! Exit code logic for the harvester process.
//!
//! Single responsibility: map run results to the process exit outcome.

use harvester_core::{BatchReport, RunSummary};

use crate::ProcessExit;

/// Any failed item makes a download run partial.
pub(crate) fn download_exit_outcome(summary: &RunSummary) -> ProcessExit {
    if summary.has_failures() {
        ProcessExit::Partial
    } else {
        ProcessExit::Success
    }
}

/// Any target that stopped early makes a harvest partial.
pub(crate) fn harvest_exit_outcome(batch: &BatchReport) -> ProcessExit {
    if batch.has_partial() {
        ProcessExit::Partial
    } else {
        ProcessExit::Success
    }
}

/// The worse of two outcomes.
pub(crate) fn combine(first: ProcessExit, second: ProcessExit) -> ProcessExit {
    first.max(second)
}
