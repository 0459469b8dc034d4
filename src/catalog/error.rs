//! Error types for catalog API access.

use thiserror::Error;

/// Errors raised while building the catalog session or fetching a page.
///
/// Per-page variants carry the query target label and page number so the
/// harvester can log them with full context, and keep the raw response body
/// for diagnosis when the server answered with something unexpected.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The credential is missing or blank.
    #[error("missing API credential: set the {var} environment variable")]
    MissingCredential {
        /// Environment variable that was consulted.
        var: &'static str,
    },

    /// A query target could not be constructed.
    #[error("invalid query target: {reason}")]
    InvalidTarget {
        /// Why the target was rejected.
        reason: String,
    },

    /// The configured API base URL cannot carry path segments.
    #[error("invalid catalog base URL: {url}")]
    InvalidBaseUrl {
        /// The rejected base URL.
        url: String,
    },

    /// The HTTP session could not be built.
    #[error("failed to build catalog HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Network-level error (DNS, connection refused, TLS, body read).
    #[error("network error fetching page {page} of {target}: {source}")]
    Network {
        /// Query target label.
        target: String,
        /// Page number being fetched.
        page: u64,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The request timed out.
    #[error("timeout fetching page {page} of {target}")]
    Timeout {
        /// Query target label.
        target: String,
        /// Page number being fetched.
        page: u64,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status} fetching page {page} of {target}")]
    HttpStatus {
        /// Query target label.
        target: String,
        /// Page number being fetched.
        page: u64,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The body was not JSON, or not shaped like a catalog page.
    #[error("unexpected response for page {page} of {target}: {reason}")]
    UnexpectedResponse {
        /// Query target label.
        target: String,
        /// Page number being fetched.
        page: u64,
        /// Parser error description.
        reason: String,
        /// Raw response body.
        body: String,
    },
}

impl CatalogError {
    /// Creates an invalid-target error.
    pub fn invalid_target(reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            reason: reason.into(),
        }
    }

    /// Creates a network error, promoting timeouts to [`CatalogError::Timeout`].
    pub fn network(target: impl Into<String>, page: u64, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                target: target.into(),
                page,
            }
        } else {
            Self::Network {
                target: target.into(),
                page,
                source,
            }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(
        target: impl Into<String>,
        page: u64,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        Self::HttpStatus {
            target: target.into(),
            page,
            status,
            body: body.into(),
        }
    }

    /// Creates an unexpected-response error.
    pub fn unexpected_response(
        target: impl Into<String>,
        page: u64,
        reason: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::UnexpectedResponse {
            target: target.into(),
            page,
            reason: reason.into(),
            body: body.into(),
        }
    }

    /// Raw response body, when the server answered at all.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { body, .. } | Self::UnexpectedResponse { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display_names_target_and_page() {
        let error = CatalogError::http_status("720246", 3, 503, "<html>busy</html>");
        let msg = error.to_string();
        assert!(msg.contains("503"), "Expected status in: {msg}");
        assert!(msg.contains("page 3"), "Expected page in: {msg}");
        assert!(msg.contains("720246"), "Expected target in: {msg}");
        assert_eq!(error.response_body(), Some("<html>busy</html>"));
    }

    #[test]
    fn test_unexpected_response_keeps_body() {
        let error = CatalogError::unexpected_response("1", 1, "expected value", "not json");
        assert_eq!(error.response_body(), Some("not json"));
        assert!(error.to_string().contains("unexpected response"));
    }

    #[test]
    fn test_missing_credential_names_variable() {
        let error = CatalogError::MissingCredential {
            var: "NARA_API_KEY",
        };
        assert!(error.to_string().contains("NARA_API_KEY"));
        assert_eq!(error.response_body(), None);
    }
}
