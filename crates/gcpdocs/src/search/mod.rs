//! Candidate resolution for free-text queries
//!
//! Design: live search providers are tried in registration order and the
//! first one that yields results wins. Keyword and product tables then add
//! their candidates unconditionally, and the merged list is ranked.

mod site;
mod web;

pub use site::SiteSearchProvider;
pub use web::WebSearchProvider;

use crate::catalog;
use crate::client::{FetchOptions, PageFetcher};
use crate::rank;
use crate::types::Candidate;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Results kept from a single provider
pub const MAX_PROVIDER_RESULTS: usize = 5;

/// Snippets are cut to this many characters
pub const MAX_SNIPPET_CHARS: usize = 300;

/// Trait for live search providers
///
/// A provider builds the URL of a search results page and parses that page
/// into candidates. Fetching and failure handling are shared: a provider
/// that cannot be reached simply contributes nothing.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Unique identifier for this provider (for logging/debugging)
    fn name(&self) -> &'static str;

    /// URL of the results page for `query`, or `None` if it cannot be built
    fn request_url(&self, query: &str, product: Option<&str>, options: &FetchOptions)
        -> Option<String>;

    /// Parse a results page into unscored candidates under the docs site
    fn parse(&self, html: &str, options: &FetchOptions) -> Vec<Candidate>;

    /// Fetch and parse results; any failure yields an empty list
    async fn search(
        &self,
        query: &str,
        product: Option<&str>,
        fetcher: &dyn PageFetcher,
        options: &FetchOptions,
    ) -> Vec<Candidate> {
        let Some(url) = self.request_url(query, product, options) else {
            warn!(provider = self.name(), "Could not build search URL");
            return Vec::new();
        };

        match fetcher.get(&url, options.search_timeout).await {
            Ok(page) if page.is_success() => {
                let mut results = dedupe_by_url(self.parse(&page.body, options));
                results.truncate(MAX_PROVIDER_RESULTS);
                debug!(provider = self.name(), count = results.len(), "Search results");
                results
            }
            Ok(page) => {
                warn!(provider = self.name(), status = page.status, "Search probe rejected");
                Vec::new()
            }
            Err(e) => {
                warn!(provider = self.name(), error = %e, "Search probe failed");
                Vec::new()
            }
        }
    }
}

/// Ordered list of live search providers
pub struct SearchProviders {
    providers: Vec<Box<dyn SearchProvider>>,
}

impl Default for SearchProviders {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl SearchProviders {
    /// Create an empty provider list
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a provider list with the built-in providers
    ///
    /// Includes (in order of priority):
    /// 1. WebSearchProvider - general web search restricted to the docs site
    /// 2. SiteSearchProvider - the docs site's own search page
    pub fn with_defaults() -> Self {
        let mut providers = Self::new();
        providers.register(Box::new(WebSearchProvider::new()));
        providers.register(Box::new(SiteSearchProvider::new()));
        providers
    }

    /// Register a provider after the existing ones
    pub fn register(&mut self, provider: Box<dyn SearchProvider>) {
        self.providers.push(provider);
    }

    /// Results of the first provider that returns any
    pub async fn probe(
        &self,
        query: &str,
        product: Option<&str>,
        fetcher: &dyn PageFetcher,
        options: &FetchOptions,
    ) -> Vec<Candidate> {
        for provider in &self.providers {
            let results = provider.search(query, product, fetcher, options).await;
            if !results.is_empty() {
                return results;
            }
        }
        Vec::new()
    }
}

/// Turns queries into ranked candidates
#[derive(Default)]
pub struct CandidateResolver {
    providers: SearchProviders,
}

impl CandidateResolver {
    /// Create a resolver with the given providers
    pub fn new(providers: SearchProviders) -> Self {
        Self { providers }
    }

    /// Probe, merge heuristic candidates, then rank and filter
    pub async fn resolve(
        &self,
        query: &str,
        product: Option<&str>,
        fetcher: &dyn PageFetcher,
        options: &FetchOptions,
    ) -> Vec<Candidate> {
        let mut candidates = if options.enable_search_probes {
            self.providers.probe(query, product, fetcher, options).await
        } else {
            Vec::new()
        };

        for candidate in heuristic_candidates(query, options) {
            if !candidates.iter().any(|c| c.url == candidate.url) {
                candidates.push(candidate);
            }
        }

        debug!(query, count = candidates.len(), "Resolved candidates");
        rank::rank(candidates, query)
    }
}

/// Candidates from the product and keyword tables, titled by their path
pub fn heuristic_candidates(query: &str, options: &FetchOptions) -> Vec<Candidate> {
    catalog::heuristic_paths(&query.to_lowercase())
        .into_iter()
        .map(|path| Candidate::new(options.doc_url(path), path, ""))
        .collect()
}

/// Keep the first candidate per URL
fn dedupe_by_url(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut unique: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !unique.iter().any(|c| c.url == candidate.url) {
            unique.push(candidate);
        }
    }
    unique
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FetchedPage;
    use crate::error::FetchError;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Serves canned pages by URL prefix; everything else is a 404
    struct CannedFetcher {
        pages: Vec<(String, String)>,
        requested: Mutex<Vec<String>>,
    }

    impl CannedFetcher {
        fn new(pages: Vec<(String, String)>) -> Self {
            Self {
                pages,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for CannedFetcher {
        async fn get(&self, url: &str, _timeout: Duration) -> Result<FetchedPage, FetchError> {
            self.requested.lock().unwrap().push(url.to_string());
            let body = self
                .pages
                .iter()
                .find(|(prefix, _)| url.starts_with(prefix.as_str()))
                .map(|(_, body)| body.clone());
            Ok(FetchedPage {
                url: url.to_string(),
                status: if body.is_some() { 200 } else { 404 },
                body: body.unwrap_or_default(),
            })
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl PageFetcher for FailingFetcher {
        async fn get(&self, _url: &str, timeout: Duration) -> Result<FetchedPage, FetchError> {
            Err(FetchError::Timeout(timeout.as_millis()))
        }
    }

    const WEB_RESULTS: &str = r#"<html><body>
        <div class="g"><a href="https://cloud.google.com/bigquery/docs/partitioned-tables&ved=1">
        <h3>Introduction to partitioned tables</h3></a>
        <div class="VwiC3b">Partitioned tables divide a table into segments.</div></div>
        </body></html>"#;

    #[test]
    fn test_providers_with_defaults() {
        let providers = SearchProviders::with_defaults();
        assert_eq!(providers.providers.len(), 2);
        assert_eq!(providers.providers[0].name(), "web_search");
        assert_eq!(providers.providers[1].name(), "site_search");
    }

    #[test]
    fn test_heuristic_candidates() {
        let options = FetchOptions::default();
        let candidates = heuristic_candidates("BigQuery partition table", &options);
        assert!(candidates.iter().any(|c| c.url
            == "https://cloud.google.com/bigquery/docs/partitioned-tables"
            && c.title == "bigquery/docs/partitioned-tables"
            && c.snippet.is_empty()));
    }

    #[test]
    fn test_dedupe_by_url() {
        let unique = dedupe_by_url(vec![
            Candidate::new("https://c/a", "first", ""),
            Candidate::new("https://c/b", "b", ""),
            Candidate::new("https://c/a", "second", ""),
        ]);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].title, "first");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_keyword_table() {
        let fetcher = CannedFetcher::new(Vec::new());
        let options = FetchOptions::default();
        let resolver = CandidateResolver::default();

        let candidates = resolver
            .resolve("bigquery partition table", None, &fetcher, &options)
            .await;

        let urls: Vec<_> = candidates.iter().map(|c| c.url.as_str()).collect();
        assert!(urls.contains(&"https://cloud.google.com/bigquery/docs/partitioned-tables"));
        assert_eq!(
            urls[0],
            "https://cloud.google.com/bigquery/docs/partitioned-tables"
        );
        // Both probes were attempted before falling back
        let requested = fetcher.requested.lock().unwrap();
        assert_eq!(requested.len(), 2);
        assert!(requested[0].starts_with("https://www.google.com/search"));
        assert!(requested[1].starts_with("https://cloud.google.com/s/results"));
    }

    #[tokio::test]
    async fn test_resolve_merges_probe_and_keyword_results() {
        let fetcher = CannedFetcher::new(vec![(
            "https://www.google.com/search".to_string(),
            WEB_RESULTS.to_string(),
        )]);
        let options = FetchOptions::default();
        let resolver = CandidateResolver::default();

        let candidates = resolver
            .resolve("bigquery partition table", None, &fetcher, &options)
            .await;

        let matching: Vec<_> = candidates
            .iter()
            .filter(|c| c.url == "https://cloud.google.com/bigquery/docs/partitioned-tables")
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].title, "Introduction to partitioned tables");
        assert!(!matching[0].snippet.is_empty());
        // The site search probe is skipped when the web probe has results
        assert_eq!(fetcher.requested.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_without_probes() {
        let fetcher = CannedFetcher::new(Vec::new());
        let options = FetchOptions {
            enable_search_probes: false,
            ..Default::default()
        };
        let candidates = CandidateResolver::default()
            .resolve("cloud run environment variable", None, &fetcher, &options)
            .await;
        assert!(fetcher.requested.lock().unwrap().is_empty());
        assert!(candidates
            .iter()
            .any(|c| c.url.ends_with("run/docs/configuring/environment-variables")));
    }

    #[tokio::test]
    async fn test_resolve_survives_network_failure() {
        let options = FetchOptions::default();
        let candidates = CandidateResolver::default()
            .resolve("gke autoscaling", None, &FailingFetcher, &options)
            .await;
        assert!(candidates.len() >= 3);
    }

    #[tokio::test]
    async fn test_resolve_unmatched_query_is_empty() {
        let fetcher = CannedFetcher::new(Vec::new());
        let candidates = CandidateResolver::default()
            .resolve("zzz qqq", None, &fetcher, &FetchOptions::default())
            .await;
        assert!(candidates.is_empty());
    }
}
