//! List APIs tool.
//!
//! Lists the APIs registered in the Developer Overheid API, one page at a time.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::common::{Listing, PageParams, fetch_page};
use crate::domains::tools::{ToolResult, TypedTool};
use crate::domains::upstream::UpstreamClient;

/// List APIs tool - `GET /apis?page=N`.
#[derive(Debug, Clone)]
pub struct ListApisTool {
    client: Arc<UpstreamClient>,
}

impl ListApisTool {
    const LISTING: Listing = Listing {
        collection: "apis",
        noun: "APIs",
    };

    pub fn new(client: Arc<UpstreamClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl TypedTool for ListApisTool {
    type Params = PageParams;

    const NAME: &'static str = "list_apis";

    const DESCRIPTION: &'static str = "List all APIs from the Developer Overheid API. Returns the upstream page as `data` and, when more results exist, the number of the following page as `nextPage`.";

    async fn execute(&self, params: PageParams, cancel: &CancellationToken) -> ToolResult {
        fetch_page(&self.client, Self::LISTING, params.page, cancel).await
    }
}
