//! HTTP client for gcpdocs
//!
//! [`PageFetcher`] is the seam between the tools and the network. The
//! reqwest-backed [`HttpPageFetcher`] sends browser-like headers and enforces
//! a per-request timeout; tests substitute their own implementation.

use crate::error::FetchError;
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::time::Duration;
use tracing::debug;

/// Accept header sent with every request
const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Accept-Language header sent with every request
const ACCEPT_LANGUAGE_EN: &str = "en-US,en;q=0.5";

/// Timeout for documentation pages
pub const PAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for search probes
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Base URL documentation paths are appended to
pub const DOCS_BASE_URL: &str = "https://cloud.google.com";

/// Web search endpoint used for the live search probe
pub const WEB_SEARCH_URL: &str = "https://www.google.com/search";

/// The documentation site's own search page
pub const SITE_SEARCH_URL: &str = "https://cloud.google.com/s/results";

/// Options that can be configured via the tool builder
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Documentation base URL, without trailing slash
    pub docs_base_url: String,
    /// Web search endpoint
    pub search_url: String,
    /// Documentation site search endpoint
    pub site_search_url: String,
    /// Timeout for documentation pages
    pub page_timeout: Duration,
    /// Timeout for search probes
    pub search_timeout: Duration,
    /// Run the live search probes before the keyword tables
    pub enable_search_probes: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            docs_base_url: DOCS_BASE_URL.to_string(),
            search_url: WEB_SEARCH_URL.to_string(),
            site_search_url: SITE_SEARCH_URL.to_string(),
            page_timeout: PAGE_TIMEOUT,
            search_timeout: SEARCH_TIMEOUT,
            enable_search_probes: true,
        }
    }
}

impl FetchOptions {
    /// Full URL of a documentation path
    pub fn doc_url(&self, path: &str) -> String {
        format!("{}/{}", self.docs_base_url, path)
    }

    /// Host (and path prefix) of the documentation site, as used in `site:` filters
    pub fn docs_site(&self) -> &str {
        self.docs_base_url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
    }

    /// Documentation path for user input that may carry slashes, a scheme or the site host
    pub fn normalize_path(&self, input: &str) -> String {
        let trimmed = input.trim().trim_start_matches('/');
        if let Some(rest) = trimmed.strip_prefix(self.docs_base_url.as_str()) {
            return rest.trim_start_matches('/').to_string();
        }

        let without_scheme = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .unwrap_or(trimmed);
        let site_prefix = format!("{}/", self.docs_site());
        without_scheme
            .strip_prefix(site_prefix.as_str())
            .unwrap_or(without_scheme)
            .to_string()
    }

    /// Whether `url` points into the documentation site, over either scheme
    pub fn is_docs_url(&self, url: &str) -> bool {
        url.strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .and_then(|rest| rest.strip_prefix(self.docs_site()))
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

/// A fetched page: final status and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs HTTP GET requests
///
/// Implementations must honor `timeout` and report it as
/// [`FetchError::Timeout`]. Non-2xx statuses are not errors at this level.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url`, giving up after `timeout`
    async fn get(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError>;
}

/// reqwest-backed page fetcher with browser-like headers
#[derive(Debug, Clone, Default)]
pub struct HttpPageFetcher {
    user_agent: Option<String>,
}

impl HttpPageFetcher {
    /// Create a fetcher, optionally overriding the User-Agent
    pub fn new(user_agent: Option<String>) -> Self {
        Self { user_agent }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let user_agent = self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_EN));
        headers
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn get(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError> {
        let timeout_ms = timeout.as_millis();

        let client = reqwest::Client::builder()
            .default_headers(self.headers())
            .timeout(timeout)
            .build()
            .map_err(FetchError::ClientBuildError)?;

        debug!(url, timeout_ms, "GET");
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout_ms))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout_ms))?;

        Ok(FetchedPage {
            url: final_url,
            status,
            body,
        })
    }
}
