//! Single-line transfer progress text.

use super::format_size;

/// Width of the `[=====-----]` bar.
pub const PROGRESS_BAR_WIDTH: usize = 30;

/// Renders one progress line for `received` bytes out of an optional declared total.
///
/// With a known, nonzero total: `[=====-----]  45%  45.3M/100.0M`.
/// Without one: `Downloaded 45.3M`.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn render_progress_line(received: u64, total: Option<u64>) -> String {
    match total.filter(|t| *t > 0) {
        Some(total) => {
            let fraction = received as f64 / total as f64;
            let filled = ((PROGRESS_BAR_WIDTH as f64 * fraction) as usize).min(PROGRESS_BAR_WIDTH);
            let bar = format!(
                "{}{}",
                "=".repeat(filled),
                "-".repeat(PROGRESS_BAR_WIDTH - filled)
            );
            format!(
                "[{bar}] {:3.0}%  {}/{}",
                fraction * 100.0,
                format_size(received),
                format_size(total)
            )
        }
        None => format!("Downloaded {}", format_size(received)),
    }
}
