//! Constants for the download module (timeouts, run directory probing).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout: longest idle gap between body reads (5 minutes).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Upper bound on `{date}-{N}` probes before the allocator gives up.
pub(crate) const MAX_OUTPUT_DIR_SEQUENCE: u32 = 100_000;
