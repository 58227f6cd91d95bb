//! List repositories tool.
//!
//! Lists the source-code repositories known to the Developer Overheid API.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::common::{Listing, PageParams, fetch_page};
use crate::domains::tools::{ToolResult, TypedTool};
use crate::domains::upstream::UpstreamClient;

/// List repositories tool - `GET /repositories?page=N`.
#[derive(Debug, Clone)]
pub struct ListRepositoriesTool {
    client: Arc<UpstreamClient>,
}

impl ListRepositoriesTool {
    const LISTING: Listing = Listing {
        collection: "repositories",
        noun: "repositories",
    };

    pub fn new(client: Arc<UpstreamClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl TypedTool for ListRepositoriesTool {
    type Params = PageParams;

    const NAME: &'static str = "list_repositories";

    const DESCRIPTION: &'static str = "List all repositories from the Developer Overheid API. Returns the upstream page as `data` and, when more results exist, the number of the following page as `nextPage`.";

    async fn execute(&self, params: PageParams, cancel: &CancellationToken) -> ToolResult {
        fetch_page(&self.client, Self::LISTING, params.page, cancel).await
    }
}
