//! Developer Overheid MCP Server Library
//!
//! This crate exposes the Developer Overheid API (APIs and source-code
//! repositories registered with the Dutch government) as Model Context
//! Protocol tools, so that MCP clients can query it without speaking HTTP.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: tool definitions, the registry/gateway and the rmcp adapter
//!   - **upstream**: the REST client and `Link` header pagination parsing
//!
//! # Example
//!
//! ```rust,no_run
//! use overheid_mcp_server::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport, config.shutdown.grace_period())
//!         .run(server)
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result, TransportService};
pub use domains::tools::{ToolRegistry, ToolResult};
