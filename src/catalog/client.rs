//! Catalog HTTP session.
//!
//! The [`CatalogClient`] is built once per run from an explicit
//! [`CatalogConfig`] and reused for every page request of that run, so
//! connections are pooled and the credential header is attached in one place.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use super::{ApiKey, CatalogError, PageResponse, QueryTarget};
use crate::download::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use crate::user_agent;

/// Default catalog API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://catalog.archives.gov/api/v2";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Explicit configuration for the catalog session.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API base URL, e.g. `https://catalog.archives.gov/api/v2`.
    pub base_url: String,
    /// Credential sent with every request.
    pub api_key: ApiKey,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Longest wait for the next response byte, in seconds.
    pub read_timeout_secs: u64,
}

impl CatalogConfig {
    /// Configuration for the public catalog with default timeouts.
    #[must_use]
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key,
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
        }
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// One fetched page: the raw JSON value for persistence, and its parsed schema.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The full response document as received.
    pub raw: serde_json::Value,
    /// The same document read through the explicit schema.
    pub parsed: PageResponse,
}

impl FetchedPage {
    /// Parses a raw JSON value through the page schema.
    ///
    /// # Errors
    ///
    /// Returns the schema error when the value is not shaped like a page.
    pub fn from_value(raw: serde_json::Value) -> Result<Self, serde_json::Error> {
        let parsed = PageResponse::deserialize(&raw)?;
        Ok(Self { raw, parsed })
    }
}

/// Anything that can deliver catalog pages to the harvester.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches one page of `target` with the given page size.
    async fn fetch_page(
        &self,
        target: &QueryTarget,
        page: u64,
        limit: u32,
    ) -> Result<FetchedPage, CatalogError>;
}

/// HTTP session against the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Builds the session: credential header, User-Agent, timeouts, gzip.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] if the base URL does not parse
    /// or cannot carry path segments, [`CatalogError::MissingCredential`] if
    /// the key cannot be sent as a header, and [`CatalogError::ClientBuild`]
    /// if reqwest rejects the configuration.
    #[instrument(level = "debug", skip(config), fields(base_url = %config.base_url))]
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let base_url = Url::parse(&config.base_url).map_err(|_| CatalogError::InvalidBaseUrl {
            url: config.base_url.clone(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl {
                url: config.base_url.clone(),
            });
        }

        let mut key_value = HeaderValue::from_str(config.api_key.expose()).map_err(|_| {
            CatalogError::MissingCredential {
                var: super::API_KEY_ENV_VAR,
            }
        })?;
        key_value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key_value);

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(CatalogError::ClientBuild)?;

        debug!(api_key = %config.api_key, "catalog session ready");
        Ok(Self { client, base_url })
    }

    /// Builds the request URL for one page of `target`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] if the base URL cannot carry
    /// path segments.
    pub fn page_url(
        &self,
        target: &QueryTarget,
        page: u64,
        limit: u32,
    ) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidBaseUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(target.path_segments());
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in target.query_pairs() {
                query.append_pair(key, &value);
            }
            query.append_pair("page", &page.to_string());
            query.append_pair("limit", &limit.to_string());
        }
        Ok(url)
    }
}

#[async_trait]
impl PageSource for CatalogClient {
    #[instrument(skip(self), fields(target = %target))]
    async fn fetch_page(
        &self,
        target: &QueryTarget,
        page: u64,
        limit: u32,
    ) -> Result<FetchedPage, CatalogError> {
        let label = target.label();
        let url = self.page_url(target, page, limit)?;
        debug!(%url, "requesting catalog page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::network(label.as_str(), page, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::network(label.as_str(), page, e))?;

        if !status.is_success() {
            return Err(CatalogError::http_status(label, page, status.as_u16(), body));
        }

        let raw: serde_json::Value = match serde_json::from_str(&body) {
            Ok(raw) => raw,
            Err(e) => {
                return Err(CatalogError::unexpected_response(
                    label,
                    page,
                    format!("response is not JSON: {e}"),
                    body,
                ));
            }
        };

        FetchedPage::from_value(raw).map_err(|e| {
            CatalogError::unexpected_response(
                label.as_str(),
                page,
                format!("response does not match the page schema: {e}"),
                body.as_str(),
            )
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::socket_guard::start_mock_server_or_skip;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    fn test_config(base_url: &str) -> CatalogConfig {
        CatalogConfig::new(ApiKey::new("test-key-123").unwrap()).with_base_url(base_url)
    }

    #[test]
    fn test_page_url_for_parent_target() {
        let client = CatalogClient::new(&test_config("https://catalog.example/api/v2")).unwrap();
        let target = QueryTarget::parent("720246").unwrap();
        let url = client.page_url(&target, 3, 100).unwrap();
        assert_eq!(
            url.as_str(),
            "https://catalog.example/api/v2/records/parentNaId/720246?page=3&limit=100"
        );
    }

    #[test]
    fn test_page_url_tolerates_trailing_slash_and_encodes_id_set() {
        let client = CatalogClient::new(&test_config("https://catalog.example/api/v2/")).unwrap();
        let target = QueryTarget::ids(["1", "2"]).unwrap();
        let url = client.page_url(&target, 1, 50).unwrap();
        assert_eq!(url.path(), "/api/v2/records/search");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("naId".to_string(), "1,2".to_string()),
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = CatalogClient::new(&test_config("not a url"));
        assert!(matches!(result, Err(CatalogError::InvalidBaseUrl { .. })));
        let result = CatalogClient::new(&test_config("mailto:someone@example.com"));
        assert!(matches!(result, Err(CatalogError::InvalidBaseUrl { .. })));
    }

    #[tokio::test]
    async fn test_fetch_page_sends_api_key_and_parses_body() {
        let Some(server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .and(path("/records/parentNaId/99"))
            .and(query_param("page", "1"))
            .and(query_param("limit", "10"))
            .and(header(API_KEY_HEADER, "test-key-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "body": {"hits": {"total": {"value": 1}, "hits": [
                    {"_source": {"record": {"naId": 5, "title": "T", "digitalObjects": []}}}
                ]}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CatalogClient::new(&test_config(&server.uri())).unwrap();
        let target = QueryTarget::parent("99").unwrap();
        let page = client.fetch_page(&target, 1, 10).await.unwrap();

        assert_eq!(page.parsed.total_records(), 1);
        assert_eq!(page.parsed.hits().len(), 1);
        assert!(page.raw.get("body").is_some());
    }

    #[tokio::test]
    async fn test_fetch_page_non_success_keeps_body() {
        let Some(server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
            .mount(&server)
            .await;

        let client = CatalogClient::new(&test_config(&server.uri())).unwrap();
        let target = QueryTarget::parent("99").unwrap();
        let error = client.fetch_page(&target, 2, 10).await.unwrap_err();

        assert!(matches!(
            error,
            CatalogError::HttpStatus {
                status: 503,
                page: 2,
                ..
            }
        ));
        assert_eq!(error.response_body(), Some("try later"));
    }

    #[tokio::test]
    async fn test_fetch_page_non_json_is_unexpected_response() {
        let Some(server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let client = CatalogClient::new(&test_config(&server.uri())).unwrap();
        let target = QueryTarget::single("7").unwrap();
        let error = client.fetch_page(&target, 1, 10).await.unwrap_err();

        assert!(matches!(error, CatalogError::UnexpectedResponse { .. }));
        assert_eq!(error.response_body(), Some("<html>login</html>"));
    }
}
