//! The static API credential sent with every catalog request.

use std::fmt;

use super::CatalogError;

/// Environment variable the binary reads the credential from.
pub const API_KEY_ENV_VAR: &str = "NARA_API_KEY";

/// Catalog API key.
///
/// `Debug` and `Display` never print the secret; use [`ApiKey::redacted`]
/// when an operator needs to confirm which key is active.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw key, rejecting blank values.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingCredential`] if the value is empty or
    /// whitespace only.
    pub fn new(raw: impl Into<String>) -> Result<Self, CatalogError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::MissingCredential {
                var: API_KEY_ENV_VAR,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Reads the key from [`API_KEY_ENV_VAR`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingCredential`] if the variable is unset or blank.
    pub fn from_env() -> Result<Self, CatalogError> {
        Self::from_env_var(API_KEY_ENV_VAR)
    }

    /// Reads the key from an arbitrary environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingCredential`] if the variable is unset or blank.
    pub fn from_env_var(var: &'static str) -> Result<Self, CatalogError> {
        let value = std::env::var(var).unwrap_or_default();
        Self::new(value).map_err(|_| CatalogError::MissingCredential { var })
    }

    /// First four characters followed by an ellipsis.
    #[must_use]
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(4).collect();
        format!("{prefix}…")
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.redacted()).finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}
