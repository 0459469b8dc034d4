//! Run aggregate and its operator-facing rendering.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use super::format_size;
use crate::download::DownloadResult;

/// Counts and failures for one download run.
///
/// Successful results are counted, never retained. Failed results are kept and
/// ordered by source row ordinal once the run finishes.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Directory the files were written to, once allocated.
    pub output_dir: Option<PathBuf>,
    /// Items handed to the engine, including skipped ones.
    pub total_items: usize,
    /// Sum of declared sizes across all items.
    pub total_declared_bytes: u64,
    /// Items a transfer was started for.
    pub attempted: usize,
    /// Items whose transfer completed.
    pub succeeded: usize,
    /// Items skipped for having no URL.
    pub skipped: usize,
    /// Bytes written to disk by successful transfers.
    pub bytes_received: u64,
    /// Wall-clock start.
    pub started_at: DateTime<Local>,
    /// Wall-clock end, set by [`RunSummary::finish`].
    pub finished_at: Option<DateTime<Local>>,
    /// Monotonic elapsed time, set by [`RunSummary::finish`].
    pub elapsed: Duration,
    failures: Vec<DownloadResult>,
    clock: Instant,
}

impl RunSummary {
    /// Starts the clock for a run over `total_items` items.
    #[must_use]
    pub fn start(total_items: usize, total_declared_bytes: u64) -> Self {
        Self {
            output_dir: None,
            total_items,
            total_declared_bytes,
            attempted: 0,
            succeeded: 0,
            skipped: 0,
            bytes_received: 0,
            started_at: Local::now(),
            finished_at: None,
            elapsed: Duration::ZERO,
            failures: Vec::new(),
            clock: Instant::now(),
        }
    }

    /// Counts an attempted item; failures are retained.
    pub fn record(&mut self, result: DownloadResult) {
        self.attempted += 1;
        if result.succeeded {
            self.succeeded += 1;
            self.bytes_received += result.bytes_received;
        } else {
            self.failures.push(result);
        }
    }

    /// Counts an item that was skipped without an attempt.
    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// Stops the clock and orders failures by row ordinal.
    pub fn finish(&mut self) {
        self.finished_at = Some(Local::now());
        self.elapsed = self.clock.elapsed();
        self.failures.sort_by_key(|result| result.item.ordinal);
    }

    /// Failed results, in row-ordinal order after [`RunSummary::finish`].
    #[must_use]
    pub fn failures(&self) -> &[DownloadResult] {
        &self.failures
    }

    /// Number of failed items.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Whether any attempted item failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Multi-line summary. Depends only on the run directory, the counts, the
    /// elapsed time and the failure list, so identical runs render identically.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("===== DOWNLOAD SUMMARY =====\n");
        // Writing into a String cannot fail.
        if let Some(dir) = &self.output_dir {
            let _ = writeln!(out, "Output directory: {}", dir.display());
        }
        let _ = writeln!(out, "Total time elapsed: {}", format_elapsed(self.elapsed));
        let _ = writeln!(out, "Downloads attempted: {}", self.attempted);
        let _ = writeln!(out, "Downloads successful: {}", self.succeeded);
        let _ = writeln!(out, "Skipped (no URL): {}", self.skipped);
        let _ = writeln!(out, "Bytes received: {}", format_size(self.bytes_received));

        if !self.failures.is_empty() {
            let _ = writeln!(out, "Failed downloads: {}", self.failures.len());
            for (index, failure) in self.failures.iter().enumerate() {
                let _ = write!(
                    out,
                    "  {}. row {}: {}",
                    index + 1,
                    failure.item.ordinal,
                    failure.item.url
                );
                if let Some(error) = &failure.error {
                    let _ = write!(out, " ({error})");
                }
                out.push('\n');
            }
        }
        out
    }
}

/// Formats a duration as `H:MM:SS.mmm`.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!(
        "{}:{:02}:{:02}.{:03}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60,
        elapsed.subsec_millis()
    )
}
