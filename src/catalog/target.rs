//! Query targets: what a paginated harvest asks the catalog for.

use std::fmt;

use super::CatalogError;
use crate::download::sanitize_filename;

/// A paginated catalog query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTarget {
    /// All records under a parent identifier.
    Parent(String),
    /// A set of two or more record identifiers.
    Ids(Vec<String>),
    /// A single record identifier.
    Single(String),
}

impl QueryTarget {
    /// Creates a parent-identifier target.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidTarget`] if the identifier is blank.
    pub fn parent(id: impl AsRef<str>) -> Result<Self, CatalogError> {
        Ok(Self::Parent(validate_id(id.as_ref())?))
    }

    /// Creates a single-identifier target.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidTarget`] if the identifier is blank.
    pub fn single(id: impl AsRef<str>) -> Result<Self, CatalogError> {
        Ok(Self::Single(validate_id(id.as_ref())?))
    }

    /// Creates a target for a set of identifiers.
    ///
    /// One identifier collapses to [`QueryTarget::Single`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidTarget`] if the set is empty or any
    /// identifier is blank.
    pub fn ids<I, S>(ids: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = ids
            .into_iter()
            .map(|id| validate_id(id.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        match ids.len() {
            0 => Err(CatalogError::invalid_target("identifier set is empty")),
            1 => Ok(Self::Single(ids.into_iter().next().unwrap_or_default())),
            _ => Ok(Self::Ids(ids)),
        }
    }

    /// Filesystem-safe label used in snapshot and CSV names.
    #[must_use]
    pub fn label(&self) -> String {
        let raw = match self {
            Self::Parent(id) | Self::Single(id) => id.clone(),
            Self::Ids(ids) => {
                let first = ids.first().map_or("", String::as_str);
                let last = ids.last().map_or("", String::as_str);
                format!("naids-{first}-{last}")
            }
        };
        sanitize_filename(&raw)
    }

    /// Path segments appended to the API base URL.
    pub(crate) fn path_segments(&self) -> Vec<&str> {
        match self {
            Self::Parent(id) => vec!["records", "parentNaId", id.as_str()],
            Self::Ids(_) | Self::Single(_) => vec!["records", "search"],
        }
    }

    /// Target-specific query parameters (paging parameters excluded).
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Parent(_) => Vec::new(),
            Self::Ids(ids) => vec![("naId", ids.join(","))],
            Self::Single(id) => vec![("naId", id.clone())],
        }
    }
}

impl fmt::Display for QueryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent(id) => write!(f, "parentNaId={id}"),
            Self::Ids(ids) => write!(f, "naId={}", ids.join(",")),
            Self::Single(id) => write!(f, "naId={id}"),
        }
    }
}

fn validate_id(raw: &str) -> Result<String, CatalogError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(CatalogError::invalid_target("identifier is blank"));
    }
    if id.contains(',') {
        return Err(CatalogError::invalid_target(format!(
            "identifier '{id}' must not contain a comma"
        )));
    }
    Ok(id.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_target_label_and_path() {
        let target = QueryTarget::parent(" 720246 ").unwrap();
        assert_eq!(target, QueryTarget::Parent("720246".to_string()));
        assert_eq!(target.label(), "720246");
        assert_eq!(
            target.path_segments(),
            vec!["records", "parentNaId", "720246"]
        );
        assert!(target.query_pairs().is_empty());
        assert_eq!(target.to_string(), "parentNaId=720246");
    }

    #[test]
    fn test_ids_target_with_one_id_collapses_to_single() {
        let target = QueryTarget::ids(["42"]).unwrap();
        assert_eq!(target, QueryTarget::Single("42".to_string()));
        assert_eq!(target.query_pairs(), vec![("naId", "42".to_string())]);
    }

    #[test]
    fn test_ids_target_label_uses_first_and_last() {
        let target = QueryTarget::ids(["1", "2", "3"]).unwrap();
        assert_eq!(target.label(), "naids-1-3");
        assert_eq!(target.path_segments(), vec!["records", "search"]);
        assert_eq!(target.query_pairs(), vec![("naId", "1,2,3".to_string())]);
    }

    #[test]
    fn test_empty_and_blank_targets_rejected() {
        assert!(matches!(
            QueryTarget::ids(Vec::<String>::new()),
            Err(CatalogError::InvalidTarget { .. })
        ));
        assert!(QueryTarget::parent("   ").is_err());
        assert!(QueryTarget::ids(["1", ""]).is_err());
        assert!(QueryTarget::single("1,2").is_err());
    }

    #[test]
    fn test_label_is_filesystem_safe() {
        let target = QueryTarget::parent("a/b:c").unwrap();
        assert_eq!(target.label(), "a_b_c");
    }
}
