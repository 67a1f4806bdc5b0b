//! Error types for gcpdocs

use crate::types::ErrorPayload;
use thiserror::Error;

/// Suggestion attached to pages that answered with a non-2xx status
pub const HTTP_STATUS_SUGGESTION: &str =
    "Please check the path and try again. Use 'list_google_cloud_products' to see available products.";

/// Errors raised by the HTTP fetch adapter
#[derive(Debug, Error)]
pub enum FetchError {
    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request did not complete within its timeout
    #[error("Request timed out after {0} ms")]
    Timeout(u128),

    /// Failed to connect to server
    #[error("Failed to connect to server: {0}")]
    ConnectError(String),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),
}

impl FetchError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error, timeout_ms: u128) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(timeout_ms)
        } else if err.is_connect() {
            FetchError::ConnectError(err.to_string())
        } else {
            FetchError::RequestError(err.to_string())
        }
    }
}

/// Reasons a documentation page could not be turned into content
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The page answered with a non-2xx status; no HTML was parsed
    #[error("Failed to fetch documentation: HTTP {status}")]
    HttpStatus { status: u16, url: String },

    /// Timeout, DNS or connection failure
    #[error("Failed to fetch documentation: {message}")]
    NetworkFailure { message: String, url: String },

    /// None of the known content containers held any markup
    #[error("Could not extract content from the page")]
    NoContent {
        url: String,
        raw_text_preview: String,
    },
}

impl ExtractionError {
    /// Build a network failure for `url` from an adapter error
    pub fn network(url: impl Into<String>, err: &FetchError) -> Self {
        ExtractionError::NetworkFailure {
            message: err.to_string(),
            url: url.into(),
        }
    }

    /// URL of the page that failed
    pub fn url(&self) -> &str {
        match self {
            ExtractionError::HttpStatus { url, .. }
            | ExtractionError::NetworkFailure { url, .. }
            | ExtractionError::NoContent { url, .. } => url,
        }
    }

    /// Caller-facing payload carrying enough context to retry
    pub fn to_payload(&self) -> ErrorPayload {
        let mut payload = ErrorPayload::new(self.to_string(), self.url());
        match self {
            ExtractionError::HttpStatus { .. } => {
                payload.suggestion = Some(HTTP_STATUS_SUGGESTION.to_string());
            }
            ExtractionError::NoContent {
                raw_text_preview, ..
            } => {
                payload.raw_text_preview = Some(raw_text_preview.clone());
            }
            ExtractionError::NetworkFailure { .. } => {}
        }
        payload
    }
}

/// Errors raised by the tool dispatcher for bad caller input
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool with this name is registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments did not match the tool's input schema
    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),

    /// A required parameter was empty
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}
