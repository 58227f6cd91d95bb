//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `handlers.rs` - The `ToolHandler` / `TypedTool` traits
//! - `result.rs` - Transport-independent tool results
//! - `registry.rs` - Central tool registry and dispatch
//! - `router.rs` - rmcp `ToolRouter` adapter for the MCP transports
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `TypedTool`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `ToolRegistry::overheid`
//!
//! Transports never need to change: they only see `ToolHandler`.

pub mod definitions;
mod error;
mod handlers;
mod registry;
mod result;
pub mod router;

pub use error::ToolError;
pub use handlers::{ToolDefinition, ToolHandler, TypedTool};
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use router::build_tool_router;
