//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tool registry.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and registered once in [`ToolRegistry`]. The rmcp `ToolRouter` is built
//! from the registry in `domains/tools/router.rs`, and the plain JSON-RPC
//! endpoint calls the registry directly, so both transports always expose the
//! same tools. **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::config::Config;
use super::error::Error;
use crate::domains::tools::{ToolError, ToolRegistry, ToolResult, build_tool_router};
use crate::domains::upstream::UpstreamClient;

const INSTRUCTIONS: &str = "This server exposes the Developer Overheid API (apis.developer.overheid.nl). \
Use list_apis and list_repositories to page through APIs and repositories; pass the returned \
nextPage as page to continue. Use get_api with an API id for the full details of one API.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. Cloning is
/// cheap: configuration and registry are shared, read-only, behind `Arc`s.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Every registered tool.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> super::error::Result<Self> {
        if config.upstream.timeout_secs == 0 {
            return Err(Error::config("upstream timeout must be at least one second"));
        }

        let client = Arc::new(UpstreamClient::new(&config.upstream)?);
        let registry = Arc::new(ToolRegistry::overheid(client)?);
        Ok(Self::with_registry(config, registry))
    }

    /// Create a server around an existing registry.
    pub fn with_registry(config: Config, registry: Arc<ToolRegistry>) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            config: Arc::new(config),
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Usage instructions announced to clients.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for the plain JSON-RPC endpoint).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.registry
            .definitions()
            .iter()
            .map(|definition| definition.to_json())
            .collect()
    }

    /// Call a tool by name (for the plain JSON-RPC endpoint).
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
        cancel: CancellationToken,
    ) -> std::result::Result<ToolResult, ToolError> {
        self.registry.call_tool(name, arguments, cancel).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info() {
        let server = McpServer::new(Config::default()).unwrap();
        let info = server.get_info();
        assert_eq!(info.server_info.name, "developer-overheid-mcp");
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("nextPage"));
    }

    #[test]
    fn test_list_tools_json() {
        let server = McpServer::new(Config::default()).unwrap();
        let tools = server.list_tools();
        let names: Vec<_> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["list_apis", "get_api", "list_repositories"]);
        assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
    }

    #[test]
    fn test_tool_router_matches_registry() {
        let server = McpServer::new(Config::default()).unwrap();
        let routed: Vec<_> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        let registered = server.registry().tool_names();
        assert_eq!(routed.len(), registered.len());
        assert!(registered.iter().all(|name| routed.iter().any(|r| r == name)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.upstream.timeout_secs = 0;
        assert!(matches!(McpServer::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = Config::default();
        config.upstream.base_url = "::not-a-url::".to_string();
        assert!(matches!(McpServer::new(config), Err(Error::Upstream(_))));
    }
}
