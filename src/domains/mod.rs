//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the MCP
//! server:
//!
//! - **tools**: MCP tools, their registry and the rmcp adapter
//! - **upstream**: the Developer Overheid API client and pagination parsing

pub mod tools;
pub mod upstream;
