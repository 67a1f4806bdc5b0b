//! Tool builder and dispatcher for the documentation tools

use crate::catalog::{self, PRODUCTS};
use crate::client::{FetchOptions, HttpPageFetcher, PageFetcher};
use crate::error::{ExtractionError, ToolError};
use crate::extract::Extractor;
use crate::search::CandidateResolver;
use crate::types::{
    ApiReferenceRequest, ApiReferenceResponse, ExtractionResult, FetchDocRequest,
    ListProductsRequest, ProductEntry, ProductListResponse, SearchDocsRequest, SearchResponse,
    SearchResultEntry,
};
use crate::{
    API_REFERENCE_DESCRIPTION, FETCH_DOC_DESCRIPTION, LIST_PRODUCTS_DESCRIPTION,
    SEARCH_DOCS_DESCRIPTION, TOOL_LLMTXT,
};
use schemars::schema_for;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Name of the page fetch tool
pub const FETCH_DOC_TOOL: &str = "fetch_google_cloud_doc";
/// Name of the search tool
pub const SEARCH_DOCS_TOOL: &str = "search_google_cloud_docs";
/// Name of the product listing tool
pub const LIST_PRODUCTS_TOOL: &str = "list_google_cloud_products";
/// Name of the API reference tool
pub const API_REFERENCE_TOOL: &str = "get_api_reference";

/// Number of top-ranked candidates whose content is fetched
pub const FETCHED_RESULTS: usize = 3;

/// Number of further candidates returned as references only
pub const RELATED_RESULTS: usize = 3;

const LIST_PRODUCTS_USAGE: &str =
    "Use \"fetch_google_cloud_doc\" with the docsPath to get documentation content.";
const UNKNOWN_SERVICE_SUGGESTION: &str =
    "Use \"list_google_cloud_products\" to see all available services.";
const UNCONFIGURED_NOTE: &str =
    "API reference path not pre-configured. Try fetching the docs URL directly.";

/// Name, description and input schema of one tool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Result of a dispatched tool call
///
/// `is_error` marks tool-level failures (an unreachable page, an unknown
/// service); the payload still describes what went wrong.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub payload: Value,
    pub is_error: bool,
}

impl ToolOutput {
    fn new<T: Serialize>(value: &T, is_error: bool) -> Self {
        Self {
            payload: serde_json::to_value(value).unwrap_or_default(),
            is_error,
        }
    }

    /// Payload rendered as indented JSON text
    pub fn to_text(&self) -> String {
        serde_json::to_string_pretty(&self.payload).unwrap_or_default()
    }
}

/// Builder for configuring the documentation tools
#[derive(Clone, Default)]
pub struct ToolBuilder {
    options: FetchOptions,
    fetcher: Option<Arc<dyn PageFetcher>>,
}

impl ToolBuilder {
    /// Create a new tool builder with default endpoints and timeouts
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.options.user_agent = Some(ua.into());
        self
    }

    /// Set the documentation base URL (trailing slashes are dropped)
    pub fn docs_base_url(mut self, url: impl Into<String>) -> Self {
        self.options.docs_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the web search endpoint
    pub fn search_url(mut self, url: impl Into<String>) -> Self {
        self.options.search_url = url.into();
        self
    }

    /// Set the documentation site search endpoint
    pub fn site_search_url(mut self, url: impl Into<String>) -> Self {
        self.options.site_search_url = url.into();
        self
    }

    /// Set the timeout for documentation pages
    pub fn page_timeout(mut self, timeout: Duration) -> Self {
        self.options.page_timeout = timeout;
        self
    }

    /// Set the timeout for search probes
    pub fn search_timeout(mut self, timeout: Duration) -> Self {
        self.options.search_timeout = timeout;
        self
    }

    /// Enable or disable the live search probes
    pub fn enable_search_probes(mut self, enable: bool) -> Self {
        self.options.enable_search_probes = enable;
        self
    }

    /// Replace the HTTP fetcher
    pub fn fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Build the tool
    pub fn build(self) -> Tool {
        let fetcher = self
            .fetcher
            .unwrap_or_else(|| Arc::new(HttpPageFetcher::new(self.options.user_agent.clone())));

        Tool {
            options: self.options,
            fetcher,
            extractor: Extractor::new(),
            resolver: Arc::new(CandidateResolver::default()),
        }
    }
}

/// Configured documentation tools
#[derive(Clone)]
pub struct Tool {
    options: FetchOptions,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Extractor,
    resolver: Arc<CandidateResolver>,
}

impl Default for Tool {
    fn default() -> Self {
        ToolBuilder::new().build()
    }
}

impl Tool {
    /// Create a new tool builder
    pub fn builder() -> ToolBuilder {
        ToolBuilder::new()
    }

    /// Options in effect
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Get full documentation (llmtxt)
    pub fn llmtxt(&self) -> &'static str {
        TOOL_LLMTXT
    }

    /// Name, description and input schema of every tool
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            definition(
                FETCH_DOC_TOOL,
                FETCH_DOC_DESCRIPTION,
                serde_json::to_value(schema_for!(FetchDocRequest)).unwrap_or_default(),
            ),
            definition(
                SEARCH_DOCS_TOOL,
                SEARCH_DOCS_DESCRIPTION,
                serde_json::to_value(schema_for!(SearchDocsRequest)).unwrap_or_default(),
            ),
            definition(
                LIST_PRODUCTS_TOOL,
                LIST_PRODUCTS_DESCRIPTION,
                serde_json::to_value(schema_for!(ListProductsRequest)).unwrap_or_default(),
            ),
            definition(
                API_REFERENCE_TOOL,
                API_REFERENCE_DESCRIPTION,
                serde_json::to_value(schema_for!(ApiReferenceRequest)).unwrap_or_default(),
            ),
        ]
    }

    /// Dispatch a named tool call with JSON arguments
    pub async fn call(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError> {
        let arguments = if arguments.is_null() {
            Value::Object(Default::default())
        } else {
            arguments
        };
        debug!(tool = name, "Tool call");

        match name {
            FETCH_DOC_TOOL => {
                let req: FetchDocRequest = serde_json::from_value(arguments)?;
                require("path", &req.path)?;
                Ok(match self.fetch_doc(&req.path).await {
                    Ok(result) => ToolOutput::new(&result, false),
                    Err(e) => ToolOutput::new(&e.to_payload(), true),
                })
            }
            SEARCH_DOCS_TOOL => {
                let req: SearchDocsRequest = serde_json::from_value(arguments)?;
                require("query", &req.query)?;
                Ok(ToolOutput::new(&self.search_docs(&req).await, false))
            }
            LIST_PRODUCTS_TOOL => {
                let _: ListProductsRequest = serde_json::from_value(arguments)?;
                Ok(ToolOutput::new(&self.list_products(), false))
            }
            API_REFERENCE_TOOL => {
                let req: ApiReferenceRequest = serde_json::from_value(arguments)?;
                require("service", &req.service)?;
                let response = self.api_reference(&req).await;
                Ok(ToolOutput::new(&response, response.is_error()))
            }
            _ => Err(ToolError::UnknownTool(name.to_string())),
        }
    }

    /// Fetch and extract one documentation page
    pub async fn fetch_doc(&self, path: &str) -> Result<ExtractionResult, ExtractionError> {
        let path = self.options.normalize_path(path);
        let url = self.options.doc_url(&path);

        let page = self
            .fetcher
            .get(&url, self.options.page_timeout)
            .await
            .map_err(|e| ExtractionError::network(&url, &e))?;

        if !page.is_success() {
            return Err(ExtractionError::HttpStatus {
                status: page.status,
                url,
            });
        }

        self.extractor.extract(&page.body, &url)
    }

    /// Resolve a query to ranked pages and fetch the best ones
    pub async fn search_docs(&self, req: &SearchDocsRequest) -> SearchResponse {
        let product = req.product.as_deref().filter(|p| !p.trim().is_empty());
        let ranked = self
            .resolver
            .resolve(&req.query, product, self.fetcher.as_ref(), &self.options)
            .await;

        let mut results = Vec::with_capacity(FETCHED_RESULTS);
        for candidate in ranked.iter().take(FETCHED_RESULTS) {
            let path = self.options.normalize_path(&candidate.url);
            let path = path.split('?').next().unwrap_or_default();

            let entry = match self.fetch_doc(path).await {
                Ok(doc) => SearchResultEntry {
                    url: candidate.url.clone(),
                    title: doc.title,
                    snippet: candidate.snippet.clone(),
                    score: candidate.score,
                    content: Some(doc.content),
                    error: None,
                },
                Err(e) => {
                    warn!(url = %candidate.url, error = %e, "Candidate extraction failed");
                    SearchResultEntry {
                        url: candidate.url.clone(),
                        title: candidate.title.clone(),
                        snippet: candidate.snippet.clone(),
                        score: candidate.score,
                        content: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            results.push(entry);
        }

        let other_related_docs = ranked
            .iter()
            .skip(FETCHED_RESULTS)
            .take(RELATED_RESULTS)
            .cloned()
            .collect();

        SearchResponse {
            query: req.query.clone(),
            product: product.unwrap_or("all").to_string(),
            total_results: ranked.len(),
            results,
            other_related_docs,
        }
    }

    /// The product catalog with full documentation URLs
    pub fn list_products(&self) -> ProductListResponse {
        let products: Vec<ProductEntry> = PRODUCTS
            .iter()
            .map(|p| ProductEntry {
                id: p.id.to_string(),
                name: p.name.to_string(),
                docs_path: p.docs_path.to_string(),
                docs_url: self.options.doc_url(p.docs_path),
                description: p.description.to_string(),
            })
            .collect();

        ProductListResponse {
            total_products: products.len(),
            products,
            usage: LIST_PRODUCTS_USAGE.to_string(),
        }
    }

    /// REST API reference for a service, optionally for one resource
    pub async fn api_reference(&self, req: &ApiReferenceRequest) -> ApiReferenceResponse {
        let Some(product) = catalog::find_product(&req.service) else {
            return ApiReferenceResponse::UnknownService {
                error: format!("Unknown service: {}", req.service),
                available_services: catalog::product_ids(),
                suggestion: UNKNOWN_SERVICE_SUGGESTION.to_string(),
            };
        };

        let Some(reference) = catalog::find_api_reference(product.id) else {
            return ApiReferenceResponse::Unconfigured {
                service: product.name.to_string(),
                docs_url: self.options.doc_url(product.docs_path),
                api_reference: format!("{}/reference", self.options.doc_url(product.docs_path)),
                note: UNCONFIGURED_NOTE.to_string(),
            };
        };

        let resource = req.resource.as_deref().filter(|r| !r.trim().is_empty());
        let path = match resource {
            Some(resource) => format!("{}/{}", reference.rest_path, resource),
            None => reference.rest_path.to_string(),
        };
        let usage = match resource {
            Some(resource) => format!("Viewing API reference for {resource}"),
            None => format!(
                "Use \"get_api_reference\" with a resource parameter to get specific resource documentation. Available: {}",
                reference.resources.join(", ")
            ),
        };

        let (documentation, fetch_command) = match self.fetch_doc(&path).await {
            Ok(doc) => (Some(doc), None),
            Err(e) => {
                warn!(path = %path, error = %e, "API reference extraction failed");
                (
                    None,
                    Some(format!("Use fetch_google_cloud_doc with path: \"{path}\"")),
                )
            }
        };

        ApiReferenceResponse::Reference {
            service: product.name.to_string(),
            description: product.description.to_string(),
            api_reference_url: self.options.doc_url(&path),
            available_resources: reference.resources.iter().map(|r| r.to_string()).collect(),
            selected_resource: resource.unwrap_or("overview").to_string(),
            documentation,
            fetch_command,
            usage,
        }
    }
}

fn definition(name: &str, description: &str, input_schema: Value) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

fn require(name: &'static str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::MissingParameter(name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FetchedPage;
    use crate::error::FetchError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    const DOC_PAGE: &str = r#"<html><head><title>Buckets | Google Cloud</title></head><body>
        <article><h1>Buckets</h1><p>A bucket is a container for objects.</p></article>
        </body></html>"#;

    /// Serves `DOC_PAGE` for URLs containing one of `found`; 404 otherwise
    struct StubFetcher {
        found: Vec<&'static str>,
        requested: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn new(found: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                found,
                requested: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn get(&self, url: &str, _timeout: Duration) -> Result<FetchedPage, FetchError> {
            self.requested.lock().unwrap().push(url.to_string());
            let hit = self.found.iter().any(|f| url.contains(f));
            Ok(FetchedPage {
                url: url.to_string(),
                status: if hit { 200 } else { 404 },
                body: if hit { DOC_PAGE.to_string() } else { String::new() },
            })
        }
    }

    fn tool(fetcher: Arc<StubFetcher>) -> Tool {
        Tool::builder()
            .enable_search_probes(false)
            .fetcher(fetcher)
            .build()
    }

    #[test]
    fn test_tool_builder() {
        let tool = Tool::builder()
            .user_agent("TestAgent/1.0")
            .docs_base_url("http://localhost:9000/")
            .search_url("http://localhost:9000/search")
            .site_search_url("http://localhost:9000/s/results")
            .page_timeout(Duration::from_secs(5))
            .search_timeout(Duration::from_secs(2))
            .enable_search_probes(false)
            .build();

        let options = tool.options();
        assert_eq!(options.user_agent.as_deref(), Some("TestAgent/1.0"));
        assert_eq!(options.docs_base_url, "http://localhost:9000");
        assert_eq!(options.search_url, "http://localhost:9000/search");
        assert_eq!(options.site_search_url, "http://localhost:9000/s/results");
        assert_eq!(options.page_timeout, Duration::from_secs(5));
        assert_eq!(options.search_timeout, Duration::from_secs(2));
        assert!(!options.enable_search_probes);
    }

    #[test]
    fn test_definitions() {
        let definitions = Tool::default().definitions();
        let names: Vec<_> = definitions.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec![FETCH_DOC_TOOL, SEARCH_DOCS_TOOL, LIST_PRODUCTS_TOOL, API_REFERENCE_TOOL]
        );
        assert!(definitions.iter().all(|d| !d.description.is_empty()));
        assert!(definitions[0].input_schema["properties"]["path"].is_object());
        assert!(definitions[1].input_schema["properties"]["product"].is_object());
        assert!(definitions[3].input_schema["properties"]["resource"].is_object());

        let serialized = serde_json::to_value(&definitions[0]).unwrap();
        assert!(serialized.get("inputSchema").is_some());
    }

    #[test]
    fn test_llmtxt() {
        let tool = Tool::default();
        assert!(tool.llmtxt().contains(FETCH_DOC_TOOL));
        assert!(tool.llmtxt().contains(API_REFERENCE_TOOL));
    }

    #[test]
    fn test_list_products() {
        let response = Tool::default().list_products();
        assert_eq!(response.total_products, 20);
        assert_eq!(response.products[0].id, "compute");
        assert_eq!(
            response.products[0].docs_url,
            "https://cloud.google.com/compute/docs"
        );
        assert!(response.usage.contains("fetch_google_cloud_doc"));
    }

    #[tokio::test]
    async fn test_fetch_doc_normalizes_path() {
        let fetcher = StubFetcher::new(vec!["storage/docs/buckets"]);
        let tool = tool(fetcher.clone());

        let result = tool
            .fetch_doc("https://cloud.google.com/storage/docs/buckets")
            .await
            .unwrap();

        assert_eq!(result.title, "Buckets");
        assert_eq!(result.url, "https://cloud.google.com/storage/docs/buckets");
        assert_eq!(
            fetcher.requested.lock().unwrap().as_slice(),
            ["https://cloud.google.com/storage/docs/buckets"]
        );
    }

    #[tokio::test]
    async fn test_fetch_doc_http_status() {
        let tool = tool(StubFetcher::new(Vec::new()));
        let err = tool.fetch_doc("storage/docs/missing").await.unwrap_err();
        assert_eq!(
            err,
            ExtractionError::HttpStatus {
                status: 404,
                url: "https://cloud.google.com/storage/docs/missing".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_call_fetch_error_payload() {
        let tool = tool(StubFetcher::new(Vec::new()));
        let output = tool
            .call(FETCH_DOC_TOOL, json!({"path": "nope/docs"}))
            .await
            .unwrap();

        assert!(output.is_error);
        assert_eq!(output.payload["error"], "Failed to fetch documentation: HTTP 404");
        assert!(output.payload["suggestion"].is_string());
        assert!(output.payload.get("content").is_none());
    }

    #[tokio::test]
    async fn test_call_errors() {
        let tool = tool(StubFetcher::new(Vec::new()));

        let err = tool.call("no_such_tool", json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: no_such_tool");

        let err = tool.call(FETCH_DOC_TOOL, json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));

        let err = tool
            .call(SEARCH_DOCS_TOOL, json!({"query": "  "}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::MissingParameter("query")));
    }

    #[tokio::test]
    async fn test_call_list_products_accepts_null_arguments() {
        let tool = tool(StubFetcher::new(Vec::new()));
        let output = tool.call(LIST_PRODUCTS_TOOL, Value::Null).await.unwrap();
        assert!(!output.is_error);
        assert_eq!(output.payload["totalProducts"], 20);
        assert!(output.to_text().contains("\"docsPath\""));
    }

    #[tokio::test]
    async fn test_search_docs_fetches_top_three() {
        let fetcher = StubFetcher::new(vec!["partitioned-tables"]);
        let tool = tool(fetcher.clone());

        let response = tool
            .search_docs(&SearchDocsRequest::new("bigquery partition table"))
            .await;

        assert_eq!(response.product, "all");
        assert_eq!(response.total_results, 4);
        assert_eq!(response.results.len(), 3);
        assert_eq!(
            response.results[0].url,
            "https://cloud.google.com/bigquery/docs/partitioned-tables"
        );
        assert_eq!(response.results[0].title, "Buckets");
        assert!(response.results[0].content.is_some());
        // creating-partitioned-tables also matches the stub
        assert!(response.results[1].content.is_some());
        let failed = &response.results[2];
        assert!(failed.content.is_none());
        assert_eq!(
            failed.error.as_deref(),
            Some("Failed to fetch documentation: HTTP 404")
        );
        assert_eq!(response.other_related_docs.len(), 1);
        assert_eq!(fetcher.requested.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_search_docs_product_label() {
        let tool = tool(StubFetcher::new(Vec::new()));
        let response = tool
            .search_docs(&SearchDocsRequest::new("zzz").product("bigquery"))
            .await;
        assert_eq!(response.product, "bigquery");
        assert_eq!(response.total_results, 0);
        assert!(response.results.is_empty());
        assert!(response.other_related_docs.is_empty());
    }

    #[tokio::test]
    async fn test_api_reference_with_resource() {
        let fetcher = StubFetcher::new(vec!["storage/docs/json_api/v1/buckets"]);
        let tool = tool(fetcher.clone());

        let response = tool
            .api_reference(&ApiReferenceRequest::new("Storage").resource("buckets"))
            .await;

        match response {
            ApiReferenceResponse::Reference {
                service,
                api_reference_url,
                available_resources,
                selected_resource,
                documentation,
                fetch_command,
                usage,
                ..
            } => {
                assert_eq!(service, "Cloud Storage");
                assert_eq!(
                    api_reference_url,
                    "https://cloud.google.com/storage/docs/json_api/v1/buckets"
                );
                assert_eq!(available_resources, vec!["buckets", "objects", "notifications"]);
                assert_eq!(selected_resource, "buckets");
                assert!(documentation.is_some());
                assert!(fetch_command.is_none());
                assert_eq!(usage, "Viewing API reference for buckets");
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_api_reference_fetch_failure() {
        let tool = tool(StubFetcher::new(Vec::new()));
        let response = tool.api_reference(&ApiReferenceRequest::new("compute")).await;

        match response {
            ApiReferenceResponse::Reference {
                selected_resource,
                documentation,
                fetch_command,
                usage,
                ..
            } => {
                assert_eq!(selected_resource, "overview");
                assert!(documentation.is_none());
                assert_eq!(
                    fetch_command.as_deref(),
                    Some("Use fetch_google_cloud_doc with path: \"compute/docs/reference/rest/v1\"")
                );
                assert!(usage.ends_with(
                    "Available: instances, disks, networks, firewalls, images, machineTypes"
                ));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_api_reference_unconfigured() {
        let fetcher = StubFetcher::new(Vec::new());
        let tool = tool(fetcher.clone());
        let response = tool.api_reference(&ApiReferenceRequest::new("vpc")).await;

        assert_eq!(
            response,
            ApiReferenceResponse::Unconfigured {
                service: "VPC".to_string(),
                docs_url: "https://cloud.google.com/vpc/docs".to_string(),
                api_reference: "https://cloud.google.com/vpc/docs/reference".to_string(),
                note: UNCONFIGURED_NOTE.to_string(),
            }
        );
        assert!(fetcher.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_call_api_reference_unknown_service() {
        let tool = tool(StubFetcher::new(Vec::new()));
        let output = tool
            .call(API_REFERENCE_TOOL, json!({"service": "mainframe"}))
            .await
            .unwrap();

        assert!(output.is_error);
        assert_eq!(output.payload["error"], "Unknown service: mainframe");
        assert_eq!(output.payload["availableServices"].as_array().unwrap().len(), 20);
        assert_eq!(output.payload["suggestion"], UNKNOWN_SERVICE_SUGGESTION);
    }
}
