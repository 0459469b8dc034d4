//! Human-readable byte sizes in the style of `ls -lh`.

const UNITS: [&str; 8] = ["K", "M", "G", "T", "P", "E", "Z", "Y"];

/// Renders a byte count: `999B`, `1.0K`, `1.5K`, `1.0M`.
///
/// Below 1024 the count is printed as whole bytes. Otherwise it is divided by
/// 1024 until it drops under 1024, with one fractional digit.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes}B");
    }

    let mut value = bytes as f64;
    let mut unit = UNITS[0];
    for candidate in UNITS {
        value /= 1024.0;
        unit = candidate;
        if value < 1024.0 {
            break;
        }
    }
    format!("{value:.1}{unit}")
}
