//! Terminal transfer observer: per-item header lines and an in-place progress line.

use harvester_core::report::render_progress_line;
use harvester_core::{DownloadItem, DownloadResult, TransferObserver};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::terminal::{log_error, now_stamp};

/// Prints one header line per item to stdout and, when enabled, redraws a
/// single progress line while the item transfers.
pub(crate) struct TerminalObserver {
    use_bar: bool,
    quiet: bool,
    bar: Option<ProgressBar>,
}

impl TerminalObserver {
    pub(crate) fn new(use_bar: bool, quiet: bool) -> Self {
        Self {
            use_bar,
            quiet,
            bar: None,
        }
    }

    fn start_bar() -> ProgressBar {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
        bar.set_style(
            ProgressStyle::with_template("{msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar
    }
}

impl TransferObserver for TerminalObserver {
    fn on_item_start(&mut self, _item: &DownloadItem, position: usize, total: usize, filename: &str) {
        if !self.quiet {
            println!(
                "{} [{position}/{total}] Downloading: {filename}  (remaining: {})",
                now_stamp(),
                total.saturating_sub(position)
            );
        }
        if self.use_bar {
            self.bar = Some(Self::start_bar());
        }
    }

    fn on_progress(&mut self, received: u64, total: Option<u64>) {
        if let Some(bar) = &self.bar {
            bar.set_message(render_progress_line(received, total));
        }
    }

    fn on_item_finish(&mut self, result: &DownloadResult) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
        if !result.succeeded {
            log_error(&format!(
                "Download error for {}: {}",
                result.item.url,
                result.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }

    fn on_item_skipped(&mut self, item: &DownloadItem, _position: usize, _total: usize) {
        if !self.quiet {
            println!("{}", skip_line(item, &now_stamp()));
        }
    }
}

/// Skips are informational: stdout, no error prefix.
fn skip_line(item: &DownloadItem, stamp: &str) -> String {
    format!("{stamp} Item {} has no objectUrl, skipping.", item.ordinal)
}
