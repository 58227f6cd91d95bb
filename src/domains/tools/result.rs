//! Tool results.
//!
//! A [`ToolResult`] is either a success carrying one or more text content
//! blocks, or a failure carrying a single diagnostic message. Transports turn
//! it into their own wire representation (`CallToolResult` for rmcp, a JSON
//! object for the plain JSON-RPC endpoint).

use rmcp::model::{CallToolResult, Content};
use serde_json::{Value, json};
use tracing::warn;

/// Outcome of a single tool invocation.
///
/// Always holds at least one content block; a failure holds exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    contents: Vec<String>,
    is_error: bool,
}

impl ToolResult {
    /// Create a success result with a single text block.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            contents: vec![content.into()],
            is_error: false,
        }
    }

    /// Create a failure result. The message is logged at `warn` level.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!("{}", message);
        Self {
            contents: vec![message],
            is_error: true,
        }
    }

    /// Whether the error flag is set.
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// Content blocks in order.
    pub fn contents(&self) -> &[String] {
        &self.contents
    }

    /// The first content block.
    pub fn first_text(&self) -> Option<&str> {
        self.contents.first().map(String::as_str)
    }

    /// MCP `CallToolResult` JSON shape: `{ content: [...], isError }`.
    pub fn to_json(&self) -> Value {
        let content: Vec<Value> = self
            .contents()
            .iter()
            .map(|text| json!({ "type": "text", "text": text }))
            .collect();

        json!({
            "content": content,
            "isError": self.is_error(),
        })
    }
}

impl From<ToolResult> for CallToolResult {
    fn from(result: ToolResult) -> Self {
        let content = result.contents.into_iter().map(Content::text).collect();
        if result.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}
