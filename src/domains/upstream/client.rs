//! HTTP client for the Developer Overheid API.
//!
//! One tool invocation maps to exactly one GET request. The request races the
//! caller's cancellation token; when the token fires, the in-flight request
//! future is dropped, which aborts the connection and releases the body.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{StatusCode, header::HeaderMap};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};
use url::Url;

use super::error::{UpstreamError, UpstreamResult};
use crate::core::config::UpstreamConfig;

/// Query string for paginated collections.
#[derive(Debug, Clone, Copy, Serialize)]
struct PageQuery {
    page: u64,
}

/// A fully received upstream response.
///
/// The body has already been read to completion, so no connection resources
/// outlive the call that produced this value.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl UpstreamResponse {
    /// HTTP status code returned by the upstream API.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Whether the upstream answered 404 Not Found.
    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }

    /// Value of a response header, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Value of the `Link` header, if present.
    pub fn link_header(&self) -> Option<&str> {
        self.header(reqwest::header::LINK.as_str())
    }

    /// Decode the body as JSON.
    ///
    /// Decoding is attempted whatever the status code; callers decide which
    /// statuses are errors in their own right.
    pub fn json<T: DeserializeOwned>(&self) -> UpstreamResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Client for the upstream REST API.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl UpstreamClient {
    /// Create a client from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::invalid_base_url(&config.base_url, e.to_string()))?;

        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::invalid_base_url(
                &config.base_url,
                "URL cannot be used as a base",
            ));
        }

        let timeout = Duration::from_secs(config.timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(UpstreamError::Client)?;

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    /// GET a page of a collection, e.g. `/apis?page=2`.
    pub async fn get_page(
        &self,
        collection: &str,
        page: u64,
        cancel: &CancellationToken,
    ) -> UpstreamResult<UpstreamResponse> {
        let url = self.endpoint(&[collection], Some(PageQuery { page }))?;
        self.get(url, cancel).await
    }

    /// GET a single item of a collection, e.g. `/apis/{id}`.
    pub async fn get_item(
        &self,
        collection: &str,
        id: &str,
        cancel: &CancellationToken,
    ) -> UpstreamResult<UpstreamResponse> {
        let url = self.endpoint(&[collection, id], None)?;
        self.get(url, cancel).await
    }

    /// Build a request URL. Every segment is percent-encoded on its own, so an
    /// identifier containing `/` or `?` stays a single path segment.
    fn endpoint(&self, segments: &[&str], query: Option<PageQuery>) -> UpstreamResult<Url> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|()| {
                UpstreamError::invalid_base_url(self.base_url.as_str(), "URL cannot be a base")
            })?
            .pop_if_empty()
            .extend(segments);

        match query {
            Some(query) => url.set_query(Some(&serde_urlencoded::to_string(query)?)),
            None => url.set_query(None),
        }

        Ok(url)
    }

    #[instrument(skip(self, cancel), fields(url = %url))]
    async fn get(&self, url: Url, cancel: &CancellationToken) -> UpstreamResult<UpstreamResponse> {
        debug!("Sending upstream request");

        let request = async {
            let response = self.http.get(url.clone()).send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>(UpstreamResponse {
                status,
                headers,
                body,
            })
        };

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Upstream request cancelled");
                return Err(UpstreamError::Cancelled);
            }
            result = request => result.map_err(|e| self.map_request_error(e))?,
        };

        debug!(
            status = response.status.as_u16(),
            bytes = response.body.len(),
            "Upstream response received"
        );

        Ok(response)
    }

    fn map_request_error(&self, error: reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            UpstreamError::Timeout(self.timeout)
        } else {
            UpstreamError::Request(error)
        }
    }
}
