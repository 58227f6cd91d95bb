//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! This is the adapter between rmcp and the transport-independent
//! [`ToolRegistry`]: one route per registered tool, each forwarding the raw
//! arguments and the request's cancellation token to the registry.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
    model::{CallToolResult, Tool},
};

use super::{ToolError, ToolRegistry};

impl From<ToolError> for McpError {
    fn from(error: ToolError) -> Self {
        match error {
            ToolError::NotFound(_) | ToolError::InvalidArguments(_) => {
                McpError::invalid_params(error.to_string(), None)
            }
            ToolError::DuplicateName(_) => McpError::internal_error(error.to_string(), None),
        }
    }
}

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .definitions()
        .into_iter()
        .fold(ToolRouter::new(), |router, definition| {
            let name = definition.name;
            let registry = registry.clone();
            router.with_route(ToolRoute::new_dyn(
                Tool::from(definition),
                move |ctx: ToolCallContext<'_, S>| {
                    let registry = registry.clone();
                    let args = ctx.arguments.clone().unwrap_or_default();
                    let cancel = ctx.request_context.ct.clone();
                    async move {
                        let result = registry.call_tool(name, args, cancel).await?;
                        Ok::<_, McpError>(CallToolResult::from(result))
                    }
                    .boxed()
                },
            ))
        })
}
