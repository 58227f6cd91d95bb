//! Get API tool.
//!
//! Fetches a single API by its identifier and returns it pretty-printed.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::domains::tools::{ToolError, ToolResult, TypedTool};
use crate::domains::upstream::UpstreamClient;

/// Parameters for the get API tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetApiParams {
    /// Identifier of the API.
    #[schemars(description = "The ID of the API to fetch")]
    pub id: String,
}

/// Get API tool - `GET /apis/{id}`.
#[derive(Debug, Clone)]
pub struct GetApiTool {
    client: Arc<UpstreamClient>,
}

impl GetApiTool {
    pub fn new(client: Arc<UpstreamClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl TypedTool for GetApiTool {
    type Params = GetApiParams;

    const NAME: &'static str = "get_api";

    const DESCRIPTION: &'static str =
        "Get a specific API by ID from the Developer Overheid API.";

    fn validate(params: &GetApiParams) -> Result<(), ToolError> {
        if params.id.trim().is_empty() {
            return Err(ToolError::invalid_arguments("'id' must not be empty"));
        }
        Ok(())
    }

    #[instrument(skip_all, fields(id = %params.id))]
    async fn execute(&self, params: GetApiParams, cancel: &CancellationToken) -> ToolResult {
        info!("Fetching API {}", params.id);

        let response = match self.client.get_item("apis", &params.id, cancel).await {
            Ok(response) => response,
            Err(e) => return ToolResult::failure(format!("Error fetching API: {}", e)),
        };

        if response.is_not_found() {
            return ToolResult::failure(format!("API with ID {} not found", params.id));
        }

        let api: Value = match response.json() {
            Ok(api) => api,
            Err(e) => return ToolResult::failure(format!("Error parsing response: {}", e)),
        };

        match serde_json::to_string_pretty(&api) {
            Ok(text) => ToolResult::text(text),
            Err(e) => ToolResult::failure(format!("Error formatting response: {}", e)),
        }
    }
}
