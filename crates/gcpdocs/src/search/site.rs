//! Documentation site search provider
//!
//! Scrapes the documentation site's own search results page. Used when the
//! web search provider returns nothing.

use super::{truncate_chars, SearchProvider, MAX_SNIPPET_CHARS};
use crate::client::FetchOptions;
use crate::extract::{compile, element_text};
use crate::types::Candidate;
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Documentation site search provider
///
/// Every result link becomes a candidate. Relative links are resolved
/// against the docs base URL; the snippet comes from the enclosing result
/// container.
pub struct SiteSearchProvider {
    link: Selector,
    container: Selector,
    snippet: Selector,
}

impl SiteSearchProvider {
    /// Create a new site search provider
    pub fn new() -> Self {
        Self {
            link: compile("a.gs-title, .gsc-thumbnail-inside a, .gs-result a"),
            container: compile(".gs-result, .gsc-webResult"),
            snippet: compile(".gs-snippet, .gs-bidi-start-align"),
        }
    }

    /// Nearest ancestor-or-self matching the result container selector
    fn container<'a>(&self, anchor: ElementRef<'a>) -> Option<ElementRef<'a>> {
        std::iter::successors(Some(anchor), |el| el.parent().and_then(ElementRef::wrap))
            .find(|el| self.container.matches(el))
    }

    fn snippet(&self, anchor: ElementRef<'_>) -> String {
        let Some(container) = self.container(anchor) else {
            return String::new();
        };
        let text: String = container.select(&self.snippet).map(element_text).collect();
        truncate_chars(text.trim(), MAX_SNIPPET_CHARS)
    }
}

impl Default for SiteSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Absolute URL for a result link
fn resolve_href(href: &str, options: &FetchOptions) -> Option<String> {
    if href.starts_with("http") {
        return Some(href.to_string());
    }
    Url::parse(&options.docs_base_url)
        .and_then(|base| base.join(href))
        .ok()
        .map(String::from)
}

#[async_trait]
impl SearchProvider for SiteSearchProvider {
    fn name(&self) -> &'static str {
        "site_search"
    }

    fn request_url(
        &self,
        query: &str,
        _product: Option<&str>,
        options: &FetchOptions,
    ) -> Option<String> {
        Url::parse_with_params(&options.site_search_url, &[("q", query)])
            .ok()
            .map(String::from)
    }

    fn parse(&self, html: &str, options: &FetchOptions) -> Vec<Candidate> {
        let document = Html::parse_document(html);
        let mut candidates = Vec::new();

        for anchor in document.root_element().select(&self.link) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let title = element_text(anchor).trim().to_string();
            if href.is_empty() || title.is_empty() {
                continue;
            }

            let Some(url) = resolve_href(href, options) else {
                continue;
            };
            if !options.is_docs_url(&url) {
                continue;
            }

            let snippet = self.snippet(anchor);
            candidates.push(Candidate::new(url, title, snippet));
        }

        candidates
    }
}
