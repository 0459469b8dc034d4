//! Filename derivation and sanitization for downloads.
//!
//! Output files are named `{recordIdentifier}_{basename}` where the basename is
//! the last segment of the URL path, or `file_{ordinal}` when the URL has none.

use url::Url;

use super::DownloadItem;

/// Last non-empty segment of the URL path, percent-decoded and sanitized.
///
/// Returns `None` when the URL does not parse or its path ends in `/`.
#[must_use]
pub fn url_basename(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let last = parsed.path_segments()?.next_back()?;
    if last.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(last).map_or_else(|_| last.to_string(), |d| d.into_owned());
    let sanitized = sanitize_filename(&decoded);
    (!sanitized.trim_matches('_').is_empty()).then_some(sanitized)
}

/// Destination filename for an item: `{recordIdentifier}_{basename-or-placeholder}`.
#[must_use]
pub fn destination_filename(item: &DownloadItem) -> String {
    let basename = url_basename(&item.url).unwrap_or_else(|| format!("file_{}", item.ordinal));
    sanitize_filename(&format!("{}_{basename}", item.record_id.trim()))
}

/// Sanitizes filename for filesystem safety.
///
/// Replaces characters that are invalid on common filesystems:
/// / \ : * ? " < > |
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }

    if is_dot_segment(&sanitized) {
        sanitized.replace('.', "_")
    } else {
        sanitized
    }
}

fn is_dot_segment(name: &str) -> bool {
    name == "." || name == ".."
}
