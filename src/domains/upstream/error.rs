//! Upstream error types.

use std::time::Duration;

use thiserror::Error;

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Errors that can occur while calling the upstream API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The configured base URL cannot be used to build request URLs.
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The query string could not be encoded.
    #[error("Failed to encode query: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    /// The request failed before a complete response was received.
    #[error("{0}")]
    Request(#[source] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,

    /// The response body is not valid JSON.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl UpstreamError {
    /// Create an invalid base URL error.
    pub fn invalid_base_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBaseUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from decoding a response body.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
