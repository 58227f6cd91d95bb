//! Upstream domain module.
//!
//! Everything needed to talk to the Developer Overheid REST API:
//!
//! - `client.rs` - HTTP client issuing one GET per tool invocation
//! - `link.rs` - `Link` header parsing and next-page extraction
//! - `error.rs` - Upstream error types
//!
//! Response bodies are never interpreted here beyond JSON decoding; the
//! upstream data model is passed through to tool results untouched.

mod client;
mod error;
pub mod link;

pub use client::{UpstreamClient, UpstreamResponse};
pub use error::{UpstreamError, UpstreamResult};
pub use link::{LinkRelation, next_page, parse_link_header};
