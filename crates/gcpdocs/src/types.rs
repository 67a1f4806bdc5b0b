//! Request and response types for the documentation tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input of `fetch_google_cloud_doc`
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FetchDocRequest {
    /// The documentation path after cloud.google.com/ (e.g.,
    /// 'compute/docs/instances/create-start-instance', 'storage/docs/creating-buckets')
    pub path: String,
}

impl FetchDocRequest {
    /// Create a new request for the given documentation path
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Input of `search_google_cloud_docs`
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchDocsRequest {
    /// Free-form search query in natural language (e.g., 'how to share encrypted
    /// bucket cross account', 'vpc peering between projects', 'cloud sql high availability')
    pub query: String,

    /// Optional: Filter by Google Cloud product (e.g., 'compute', 'storage',
    /// 'bigquery', 'kubernetes', 'sql', 'run')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
}

impl SearchDocsRequest {
    /// Create a new search request
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            product: None,
        }
    }

    /// Restrict the live search probe to a product
    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }
}

/// Input of `list_google_cloud_products` (takes no parameters)
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListProductsRequest {}

/// Input of `get_api_reference`
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ApiReferenceRequest {
    /// The Google Cloud service name (e.g., 'compute', 'storage', 'bigquery',
    /// 'pubsub', 'sql', 'kubernetes', 'functions', 'run', 'iam')
    pub service: String,

    /// Optional: Specific API resource (e.g., 'instances', 'buckets', 'datasets', 'topics')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl ApiReferenceRequest {
    /// Create a new request for a service overview
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            resource: None,
        }
    }

    /// Select a specific API resource
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }
}

/// Structured content extracted from one documentation page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Page title
    pub title: String,
    /// Page URL
    pub url: String,
    /// Markdown content, at most [`MAX_CONTENT_CHARS`](crate::MAX_CONTENT_CHARS) characters
    pub content: String,
    /// Character count of the content before truncation
    pub content_length: usize,
    /// True if `content` was cut
    pub truncated: bool,
}

/// Error payload returned in place of content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub error: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text_preview: Option<String>,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            url: url.into(),
            suggestion: None,
            raw_text_preview: None,
        }
    }
}

/// A scored, not yet fetched reference to a documentation page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub url: String,
    pub title: String,
    pub snippet: String,
    pub score: i32,
}

impl Candidate {
    /// Unscored candidate
    pub fn new(url: impl Into<String>, title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            snippet: snippet.into(),
            score: 0,
        }
    }
}

/// One materialized search result: a candidate plus its content or error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultEntry {
    pub url: String,
    pub title: String,
    pub snippet: String,
    pub score: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Output of `search_google_cloud_docs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    /// Product filter, or "all"
    pub product: String,
    /// Number of candidates that survived relevance filtering
    pub total_results: usize,
    /// Top candidates with fetched content
    pub results: Vec<SearchResultEntry>,
    /// Further candidates, not fetched
    pub other_related_docs: Vec<Candidate>,
}

/// Product entry of `list_google_cloud_products`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductEntry {
    pub id: String,
    pub name: String,
    pub docs_path: String,
    pub docs_url: String,
    pub description: String,
}

/// Output of `list_google_cloud_products`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub total_products: usize,
    pub products: Vec<ProductEntry>,
    pub usage: String,
}

/// Output of `get_api_reference`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiReferenceResponse {
    /// Service with a known REST reference
    #[serde(rename_all = "camelCase")]
    Reference {
        service: String,
        description: String,
        api_reference_url: String,
        available_resources: Vec<String>,
        selected_resource: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        documentation: Option<ExtractionResult>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fetch_command: Option<String>,
        usage: String,
    },
    /// Known product without a REST reference table
    #[serde(rename_all = "camelCase")]
    Unconfigured {
        service: String,
        docs_url: String,
        api_reference: String,
        note: String,
    },
    /// Service name not in the product catalog
    #[serde(rename_all = "camelCase")]
    UnknownService {
        error: String,
        available_services: Vec<String>,
        suggestion: String,
    },
}

impl ApiReferenceResponse {
    /// True for the unknown-service variant
    pub fn is_error(&self) -> bool {
        matches!(self, ApiReferenceResponse::UnknownService { .. })
    }
}
