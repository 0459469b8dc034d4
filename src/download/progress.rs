//! Transfer observer: how the engine reports progress without owning presentation.

use super::{DownloadItem, DownloadResult};

/// Receives engine events. Rendering (bars, percentages, log lines) lives in
/// implementations, never in the transfer loop.
pub trait TransferObserver {
    /// An item is about to be transferred. `position` is 1-based.
    fn on_item_start(&mut self, _item: &DownloadItem, _position: usize, _total: usize, _filename: &str) {
    }

    /// Called after every chunk written: bytes so far, and the server-declared total if any.
    fn on_progress(&mut self, received: u64, total: Option<u64>);

    /// The item finished, successfully or not.
    fn on_item_finish(&mut self, _result: &DownloadResult) {}

    /// The item was skipped because it has no URL.
    fn on_item_skipped(&mut self, _item: &DownloadItem, _position: usize, _total: usize) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TransferObserver for NoopObserver {
    fn on_progress(&mut self, _received: u64, _total: Option<u64>) {}
}
