//! Explicit schema for one page of catalog search results.
//!
//! The catalog wraps an Elasticsearch-style response:
//!
//! ```text
//! body.hits.total.value            -> total hit count
//! body.hits.hits[]._source.record  -> one catalog record
//!   .naId, .title, .digitalObjects[].objectUrl, .digitalObjects[].objectFileSize
//! ```
//!
//! Every level is optional on the wire. Absence is represented explicitly
//! (`Option`, [`DeclaredSize::Absent`]) and resolved to defaults in exactly
//! one place each: the accessor methods below.

use std::fmt;

use serde::Deserialize;

/// One page of results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageResponse {
    /// Response body wrapper.
    #[serde(default)]
    pub body: Option<Body>,
}

/// `body` object of a page response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Body {
    /// Hit section.
    #[serde(default)]
    pub hits: Option<HitsSection>,
}

/// `body.hits` object: the total and the hits of this page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HitsSection {
    /// Total number of hits for the whole query.
    #[serde(default)]
    pub total: Option<TotalHits>,
    /// Hits on this page.
    #[serde(default)]
    pub hits: Option<Vec<Hit>>,
}

/// Total hit count, either `{"value": N}` or a bare number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    /// `{"value": N, "relation": "eq"}`
    Object {
        /// The count.
        #[serde(default)]
        value: Option<u64>,
    },
    /// Bare `N`.
    Count(u64),
}

/// One search hit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hit {
    /// `_source` document.
    #[serde(rename = "_source", default)]
    pub source: Option<HitSource>,
}

/// `_source` document of a hit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HitSource {
    /// The catalog record.
    #[serde(default)]
    pub record: Option<Record>,
}

/// One catalog record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Record {
    /// Catalog identifier.
    #[serde(rename = "naId", default)]
    pub na_id: Option<RecordId>,
    /// Record title.
    #[serde(default)]
    pub title: Option<String>,
    /// Attached downloadable assets.
    #[serde(rename = "digitalObjects", default)]
    pub digital_objects: Option<Vec<DigitalObject>>,
}

/// Record identifier; the catalog emits it as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric identifier.
    Number(u64),
    /// Textual identifier.
    Text(String),
}

/// One asset descriptor attached to a record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DigitalObject {
    /// Download URL. Absent or empty is a normal condition.
    #[serde(rename = "objectUrl", default)]
    pub object_url: Option<String>,
    /// Declared byte size.
    #[serde(rename = "objectFileSize", default)]
    pub object_file_size: DeclaredSize,
}

/// Declared size of an asset as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DeclaredSize {
    /// A non-negative integer.
    Bytes(u64),
    /// A string, possibly numeric.
    Text(String),
    /// Missing or `null`.
    #[default]
    Absent,
    /// Anything else (negative numbers, floats, objects).
    Other(serde_json::Value),
}

impl PageResponse {
    /// Total hits for the whole query; an absent total counts as zero.
    #[must_use]
    pub fn total_records(&self) -> u64 {
        match self.hits_section().and_then(|section| section.total.as_ref()) {
            Some(TotalHits::Object { value }) => value.unwrap_or(0),
            Some(TotalHits::Count(count)) => *count,
            None => 0,
        }
    }

    /// Whether the response carried a total at all.
    #[must_use]
    pub fn has_total(&self) -> bool {
        matches!(
            self.hits_section().and_then(|section| section.total.as_ref()),
            Some(TotalHits::Count(_) | TotalHits::Object { value: Some(_) })
        )
    }

    /// Hits on this page; an absent list is empty.
    #[must_use]
    pub fn hits(&self) -> &[Hit] {
        self.hits_section()
            .and_then(|section| section.hits.as_deref())
            .unwrap_or_default()
    }

    /// Takes the hits out of the page; an absent list is empty.
    #[must_use]
    pub fn into_hits(self) -> Vec<Hit> {
        self.body
            .and_then(|body| body.hits)
            .and_then(|section| section.hits)
            .unwrap_or_default()
    }

    fn hits_section(&self) -> Option<&HitsSection> {
        self.body.as_ref()?.hits.as_ref()
    }
}

impl Hit {
    /// The record carried by this hit, if any.
    #[must_use]
    pub fn record(&self) -> Option<&Record> {
        self.source.as_ref()?.record.as_ref()
    }
}

impl Record {
    /// Identifier rendered as text; empty when absent.
    #[must_use]
    pub fn identifier(&self) -> String {
        self.na_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Title; empty when absent.
    #[must_use]
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Asset descriptors; empty when absent.
    #[must_use]
    pub fn assets(&self) -> &[DigitalObject] {
        self.digital_objects.as_deref().unwrap_or_default()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl DigitalObject {
    /// URL; empty when absent.
    #[must_use]
    pub fn url(&self) -> &str {
        self.object_url.as_deref().unwrap_or_default()
    }

    /// Declared size in bytes.
    #[must_use]
    pub fn declared_bytes(&self) -> u64 {
        self.object_file_size.bytes()
    }
}

impl DeclaredSize {
    /// Resolves the wire value to bytes; absent or non-numeric is zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn bytes(&self) -> u64 {
        match self {
            Self::Bytes(n) => *n,
            Self::Text(s) => s.trim().parse().unwrap_or(0),
            Self::Absent => 0,
            Self::Other(value) => value
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map_or(0, |f| f as u64),
        }
    }
}
