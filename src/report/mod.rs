//! Operator-facing reporting: byte sizes, progress lines, and the run summary.

mod progress;
mod size;
mod summary;

pub use progress::{PROGRESS_BAR_WIDTH, render_progress_line};
pub use size::format_size;
pub use summary::{RunSummary, format_elapsed};
