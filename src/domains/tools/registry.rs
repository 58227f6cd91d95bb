//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools, in registration order
//! - Name-based dispatch shared by every transport
//! - Tool metadata for listing
//!
//! The registry is built once at startup and only read afterwards, so a single
//! `Arc<ToolRegistry>` is shared by all concurrent invocations without locks.
//! Every call is tracked while it runs so that shutdown can wait for the
//! in-flight ones.

use std::sync::Arc;

use rmcp::model::JsonObject;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{info, instrument, warn};

use super::definitions::{GetApiTool, ListApisTool, ListRepositoriesTool};
use super::{ToolDefinition, ToolError, ToolHandler, ToolResult};
use crate::domains::upstream::UpstreamClient;

/// Tool registry - owns every registered tool handler.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolHandler>>,
    in_flight: TaskTracker,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the registry with every Developer Overheid tool.
    pub fn overheid(client: Arc<UpstreamClient>) -> Result<Self, ToolError> {
        let mut registry = Self::new();
        registry.register(ListApisTool::new(client.clone()))?;
        registry.register(GetApiTool::new(client.clone()))?;
        registry.register(ListRepositoriesTool::new(client))?;
        Ok(registry)
    }

    /// Register a tool. Names must be unique.
    pub fn register(&mut self, tool: impl ToolHandler + 'static) -> Result<(), ToolError> {
        let name = tool.definition().name;
        if self.get(name).is_some() {
            return Err(ToolError::duplicate_name(name));
        }
        self.tools.push(Arc::new(tool));
        Ok(())
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolHandler>> {
        self.tools.iter().find(|tool| tool.definition().name == name)
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|tool| tool.definition().name).collect()
    }

    /// Get all tool definitions.
    ///
    /// This is the single source of truth for all available tools.
    /// Every transport lists tools through this method.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|tool| tool.definition()).collect()
    }

    /// Tool calls currently executing.
    ///
    /// Once closed, [`TaskTracker::wait`] resolves when the last one finishes.
    pub fn in_flight(&self) -> &TaskTracker {
        &self.in_flight
    }

    /// Dispatch a tool call to the appropriate handler.
    #[instrument(skip(self, arguments, cancel))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
        cancel: CancellationToken,
    ) -> Result<ToolResult, ToolError> {
        let Some(tool) = self.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };

        let result = self
            .in_flight
            .track_future(tool.invoke(arguments, cancel))
            .await?;
        info!(is_error = result.is_error(), "Tool call finished");
        Ok(result)
    }
}
