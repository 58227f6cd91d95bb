//! Developer Overheid tools module.
//!
//! Tools backed by the Developer Overheid REST API:
//! - `list_apis`: paginated list of registered APIs
//! - `get_api`: a single API by identifier
//! - `list_repositories`: paginated list of source-code repositories

pub mod common;
pub mod get_api;
pub mod list_apis;
pub mod list_repositories;

pub use common::PageParams;
pub use get_api::{GetApiParams, GetApiTool};
pub use list_apis::ListApisTool;
pub use list_repositories::ListRepositoriesTool;
