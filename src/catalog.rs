//! Fail-soft client for the Pokemon TCG card catalog.
//!
//! Every public lookup returns a success-shaped value: a failed search is an
//! empty page and a failed lookup is `None`. The underlying error is handed
//! to the [`DiagnosticSink`] instead of the caller.

use crate::config;
use crate::diagnostics::{DiagnosticEvent, DiagnosticSink};
use crate::error::{Result, TcgError};
use crate::models::{CardRecord, SearchResult, SingleCardResponse};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Issues search and lookup requests against the catalog API.
///
/// Stateless apart from the HTTP client and its fixed API-key header: no
/// retries and no caching, one request per call.
pub struct CatalogClient {
    base_url: Url,
    client: Client,
    sink: Arc<dyn DiagnosticSink>,
}

impl fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// `api_key`, when present, is sent as the `X-Api-Key` header on every
    /// request. `timeout` bounds each request end to end.
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        timeout: Duration,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| TcgError::InvalidArgument(format!("Invalid base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(TcgError::InvalidArgument(format!(
                "Base URL cannot have path segments: {}",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let mut value = HeaderValue::from_str(key)
                .map_err(|_| TcgError::InvalidArgument("API key is not a valid header value".into()))?;
            value.set_sensitive(true);
            let name = HeaderName::from_bytes(config::API_KEY_HEADER.as_bytes())
                .map_err(|e| TcgError::InvalidArgument(e.to_string()))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url,
            client,
            sink,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    // -- Search ------------------------------------------------------------

    /// Search cards by name prefix.
    ///
    /// A blank `query` applies no filter and returns the catalog's default
    /// ordering. `page` and `page_size` below 1 are raised to 1. Any failure
    /// yields an empty list.
    pub fn search(&self, query: &str, page: u32, page_size: u32) -> Vec<CardRecord> {
        self.search_page(query, page, page_size).cards
    }

    /// [`search`](Self::search) with the catalog's default paging: page
    /// [`DEFAULT_PAGE`](config::DEFAULT_PAGE) of
    /// [`DEFAULT_PAGE_SIZE`](config::DEFAULT_PAGE_SIZE) cards.
    pub fn search_first_page(&self, query: &str) -> Vec<CardRecord> {
        self.search(query, config::DEFAULT_PAGE, config::DEFAULT_PAGE_SIZE)
    }

    /// Like [`search`](Self::search) but keeps the pagination metadata.
    ///
    /// On failure the result is empty, echoes the requested page and page
    /// size, and reports zero counts.
    pub fn search_page(&self, query: &str, page: u32, page_size: u32) -> SearchResult {
        let page = page.max(1);
        let page_size = page_size.max(1);

        match self.try_search(query, page, page_size) {
            Ok(result) => result,
            Err(e) => {
                self.sink.record(&DiagnosticEvent::SearchFailed {
                    query: query.to_string(),
                    page,
                    page_size,
                    error: e.to_string(),
                });
                SearchResult::empty(page, page_size)
            }
        }
    }

    fn try_search(&self, query: &str, page: u32, page_size: u32) -> Result<SearchResult> {
        let url = self.endpoint(&["cards"])?;

        let mut params = vec![
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        let query = query.trim();
        if !query.is_empty() {
            params.push(("q", format!("name:{}*", query)));
        }

        log::debug!("Searching cards: {} {:?}", url, params);
        let body = self.get_text(self.client.get(url).query(&params))?;
        let result: SearchResult = serde_json::from_str(&body)?;
        log::debug!(
            "Search returned {} of {} cards",
            result.cards.len(),
            result.total_count
        );
        Ok(result)
    }

    // -- Single card lookup ------------------------------------------------

    /// Look up one card by exact id.
    ///
    /// Returns `None` when the card does not exist and when the request
    /// fails; the two cases are not distinguished.
    pub fn get_by_id(&self, id: &str) -> Option<CardRecord> {
        if id.trim().is_empty() {
            log::debug!("Skipping card lookup for blank id");
            return None;
        }

        match self.try_get_by_id(id) {
            Ok(card) => card,
            Err(e) => {
                self.sink.record(&DiagnosticEvent::LookupFailed {
                    id: id.to_string(),
                    error: e.to_string(),
                });
                None
            }
        }
    }

    fn try_get_by_id(&self, id: &str) -> Result<Option<CardRecord>> {
        let url = self.endpoint(&["cards", id])?;
        log::debug!("Fetching card: {}", url);
        let body = self.get_text(self.client.get(url))?;
        let resp: SingleCardResponse = serde_json::from_str(&body)?;
        Ok(resp.data)
    }

    // -- Helpers -------------------------------------------------------------

    /// Base URL with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TcgError::InvalidArgument(format!("Invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and return the body of a 2xx response.
    fn get_text(&self, request: reqwest::blocking::RequestBuilder) -> Result<String> {
        let resp = request.send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TcgError::Status(status.as_u16()));
        }
        Ok(resp.text()?)
    }
}
