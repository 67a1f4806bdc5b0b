//! Web search provider
//!
//! Queries a general web search engine restricted to the documentation site
//! with a `site:` filter and scrapes the organic results.

use super::{truncate_chars, SearchProvider, MAX_SNIPPET_CHARS};
use crate::client::FetchOptions;
use crate::extract::{compile, element_text};
use crate::types::Candidate;
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Number of results requested from the search engine
const RESULTS_REQUESTED: &str = "10";

/// Fallback snippet divs must have more than this many characters
const MIN_FALLBACK_SNIPPET_CHARS: usize = 50;

/// Fallback snippet divs must have fewer than this many characters
const MAX_FALLBACK_SNIPPET_CHARS: usize = 500;

/// Web search provider
///
/// Result blocks are `div.g` or `div[data-hveid]`. Each contributes its first
/// absolute link, its first `h3` as title and a snippet when one is found.
pub struct WebSearchProvider {
    result: Selector,
    link: Selector,
    title: Selector,
    snippet: Selector,
    div: Selector,
}

impl WebSearchProvider {
    /// Create a new web search provider
    pub fn new() -> Self {
        Self {
            result: compile("div.g, div[data-hveid]"),
            link: compile("a[href^='http']"),
            title: compile("h3"),
            snippet: compile("div[data-sncf], div.VwiC3b, span.aCOpRe"),
            div: compile("div"),
        }
    }

    fn snippet(&self, block: ElementRef<'_>) -> String {
        if let Some(el) = block.select(&self.snippet).next() {
            return element_text(el).trim().to_string();
        }

        block
            .select(&self.div)
            .map(element_text)
            .find(|text| {
                let len = text.chars().count();
                len > MIN_FALLBACK_SNIPPET_CHARS && len < MAX_FALLBACK_SNIPPET_CHARS
            })
            .map(|text| text.trim().to_string())
            .unwrap_or_default()
    }
}

impl Default for WebSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for WebSearchProvider {
    fn name(&self) -> &'static str {
        "web_search"
    }

    fn request_url(
        &self,
        query: &str,
        product: Option<&str>,
        options: &FetchOptions,
    ) -> Option<String> {
        let site = match product {
            Some(product) => format!("site:{}/{}", options.docs_site(), product),
            None => format!("site:{}", options.docs_site()),
        };
        let q = format!("{site} {query}");

        Url::parse_with_params(&options.search_url, &[("q", q.as_str()), ("num", RESULTS_REQUESTED)])
            .ok()
            .map(String::from)
    }

    fn parse(&self, html: &str, options: &FetchOptions) -> Vec<Candidate> {
        let document = Html::parse_document(html);
        let mut candidates = Vec::new();

        for block in document.root_element().select(&self.result) {
            let Some(href) = block
                .select(&self.link)
                .next()
                .and_then(|a| a.value().attr("href"))
            else {
                continue;
            };

            // Tracking parameters follow the first '&'
            let url = href.split('&').next().unwrap_or(href);
            if !options.is_docs_url(url) {
                continue;
            }

            let title = block
                .select(&self.title)
                .next()
                .map(|h| element_text(h).trim().to_string())
                .unwrap_or_default();
            if title.is_empty() {
                continue;
            }

            let snippet = truncate_chars(&self.snippet(block), MAX_SNIPPET_CHARS);
            candidates.push(Candidate::new(url, title, snippet));
        }

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> FetchOptions {
        FetchOptions::default()
    }

    #[test]
    fn test_request_url() {
        let provider = WebSearchProvider::new();
        let url = provider
            .request_url("cloud run scaling", None, &options())
            .unwrap();
        let parsed = Url::parse(&url).unwrap();
        let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        assert!(url.starts_with("https://www.google.com/search?"));
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "site:cloud.google.com cloud run scaling".to_string()),
                ("num".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_request_url_with_product() {
        let provider = WebSearchProvider::new();
        let url = provider
            .request_url("partition", Some("bigquery"), &options())
            .unwrap();
        let parsed = Url::parse(&url).unwrap();
        let q = parsed
            .query_pairs()
            .find(|(k, _)| k == "q")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(q, "site:cloud.google.com/bigquery partition");
    }

    #[test]
    fn test_request_url_invalid_endpoint() {
        let provider = WebSearchProvider::new();
        let options = FetchOptions {
            search_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(provider.request_url("x", None, &options).is_none());
    }

    #[test]
    fn test_parse_results() {
        let html = r#"<html><body>
            <div class="g">
              <a href="https://cloud.google.com/run/docs/configuring/services/environment-variables&sa=U&ved=2">
                <h3>Configure environment variables</h3>
              </a>
              <div class="VwiC3b">  You can set environment variables on a service.  </div>
            </div>
            <div class="g">
              <a href="https://stackoverflow.com/questions/1"><h3>Off-site answer</h3></a>
            </div>
            <div data-hveid="CAE">
              <a href="https://cloud.google.com/run/docs/overview"><h3>What is Cloud Run</h3></a>
              <span class="aCOpRe">Cloud Run overview.</span>
            </div>
            <div class="g">
              <a href="https://cloud.google.com/run/docs/no-title">No heading here</a>
            </div>
        </body></html>"#;

        let results = WebSearchProvider::new().parse(html, &options());

        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0].url,
            "https://cloud.google.com/run/docs/configuring/services/environment-variables"
        );
        assert_eq!(results[0].title, "Configure environment variables");
        assert_eq!(results[0].snippet, "You can set environment variables on a service.");
        assert_eq!(results[0].score, 0);
        assert_eq!(results[1].url, "https://cloud.google.com/run/docs/overview");
        assert_eq!(results[1].snippet, "Cloud Run overview.");
    }

    #[test]
    fn test_parse_keeps_plain_http_links() {
        let html = r#"<html><body>
            <div class="g">
              <a href="http://cloud.google.com/sql/docs/mysql/high-availability"><h3>High availability</h3></a>
            </div>
            <div class="g">
              <a href="http://cloud.google.com.mirror.example/sql/docs"><h3>Mirror</h3></a>
            </div>
        </body></html>"#;

        let results = WebSearchProvider::new().parse(html, &options());

        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].url,
            "http://cloud.google.com/sql/docs/mysql/high-availability"
        );
        assert_eq!(results[0].title, "High availability");
    }

    #[test]
    fn test_parse_fallback_snippet() {
        let long = "x".repeat(80);
        let html = format!(
            r#"<div class="g">
                 <a href="https://cloud.google.com/sql/docs"><h3>Cloud SQL</h3></a>
                 <div>short</div>
                 <div>{long}</div>
               </div>"#
        );

        let results = WebSearchProvider::new().parse(&html, &options());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].snippet, long);
    }

    #[test]
    fn test_parse_snippet_truncated() {
        let long = "y".repeat(400);
        let html = format!(
            r#"<div class="g">
                 <a href="https://cloud.google.com/sql/docs"><h3>Cloud SQL</h3></a>
                 <div class="VwiC3b">{long}</div>
               </div>"#
        );

        let results = WebSearchProvider::new().parse(&html, &options());
        assert_eq!(results[0].snippet.chars().count(), MAX_SNIPPET_CHARS);
    }

    #[test]
    fn test_parse_empty_page() {
        let results = WebSearchProvider::new().parse("<html><body></body></html>", &options());
        assert!(results.is_empty());
    }
}
