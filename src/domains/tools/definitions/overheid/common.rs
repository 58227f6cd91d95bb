//! Helpers shared by the Developer Overheid tools.
//!
//! The two listing tools only differ in the collection they read, so the whole
//! fetch / paginate / assemble sequence lives here.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::domains::tools::ToolResult;
use crate::domains::upstream::{UpstreamClient, link};

/// Parameters for paginated listing tools.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PageParams {
    /// Page number to fetch.
    #[schemars(description = "Page number to fetch (1-based, default: 1)")]
    #[serde(default)]
    pub page: Option<i64>,
}

/// A collection exposed by a listing tool.
#[derive(Debug, Clone, Copy)]
pub struct Listing {
    /// Path segment below the base URL, e.g. `apis`.
    pub collection: &'static str,
    /// Noun used in diagnostics, e.g. `APIs`.
    pub noun: &'static str,
}

/// Success payload of a listing tool.
#[derive(Debug, Serialize)]
pub struct PageEnvelope<'a> {
    /// Upstream body, re-encoded compactly with its key order kept.
    pub data: &'a Value,

    /// Next page number, when the upstream advertises one.
    #[serde(rename = "nextPage", skip_serializing_if = "Option::is_none")]
    pub next_page: Option<u64>,
}

/// Effective page number: missing, zero or negative pages mean the first one.
pub fn normalize_page(page: Option<i64>) -> u64 {
    page.and_then(|p| u64::try_from(p).ok())
        .filter(|p| *p > 0)
        .unwrap_or(1)
}

/// Fetch one page of `listing` and assemble the `{ data, nextPage }` result.
#[instrument(skip(client, cancel), fields(collection = listing.collection))]
pub async fn fetch_page(
    client: &Arc<UpstreamClient>,
    listing: Listing,
    page: Option<i64>,
    cancel: &CancellationToken,
) -> ToolResult {
    let page = normalize_page(page);
    info!("Fetching {} page {}", listing.noun, page);

    let response = match client.get_page(listing.collection, page, cancel).await {
        Ok(response) => response,
        Err(e) => return ToolResult::failure(format!("Error fetching {}: {}", listing.noun, e)),
    };

    let data: Value = match response.json() {
        Ok(data) => data,
        Err(e) => return ToolResult::failure(format!("Error parsing response: {}", e)),
    };

    let envelope = PageEnvelope {
        data: &data,
        next_page: link::next_page_from_header(response.link_header()),
    };

    match serde_json::to_string(&envelope) {
        Ok(text) => ToolResult::text(text),
        Err(e) => ToolResult::failure(format!("Error formatting response: {}", e)),
    }
}
