//! Tool handler traits.
//!
//! [`ToolHandler`] is the only interface transports depend on: a name, a
//! description, a parameter schema and an `invoke` entry point taking raw JSON
//! arguments. Concrete tools implement [`TypedTool`] instead and get argument
//! decoding and schema generation from the blanket implementation.

use std::sync::Arc;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use super::{ToolError, ToolResult};

/// Immutable description of a registered tool.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: &'static str,
    /// Human-readable description shown to clients.
    pub description: &'static str,
    /// JSON schema of the accepted arguments.
    pub input_schema: Arc<JsonObject>,
}

impl ToolDefinition {
    /// JSON shape used by `tools/list`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema.as_ref(),
        })
    }
}

impl From<ToolDefinition> for Tool {
    fn from(definition: ToolDefinition) -> Self {
        Tool {
            name: definition.name.into(),
            description: Some(definition.description.into()),
            input_schema: definition.input_schema,
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

/// Object-safe tool interface used by the registry and the transports.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Tool metadata.
    fn definition(&self) -> ToolDefinition;

    /// Decode `arguments` and run the tool.
    ///
    /// Returns `Err` only when the arguments do not match the tool's
    /// parameters; everything that goes wrong afterwards is a
    /// failed [`ToolResult`].
    async fn invoke(
        &self,
        arguments: JsonObject,
        cancel: CancellationToken,
    ) -> Result<ToolResult, ToolError>;
}

/// A tool with a strongly typed parameter struct.
#[async_trait::async_trait]
pub trait TypedTool: Send + Sync + 'static {
    /// Parameter shape; its JSON schema is published to clients.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Semantic checks serde cannot express.
    fn validate(_params: &Self::Params) -> Result<(), ToolError> {
        Ok(())
    }

    /// Run the tool with decoded, validated parameters.
    async fn execute(&self, params: Self::Params, cancel: &CancellationToken) -> ToolResult;
}

#[async_trait::async_trait]
impl<T: TypedTool> ToolHandler for T {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: T::NAME,
            description: T::DESCRIPTION,
            input_schema: cached_schema_for_type::<T::Params>(),
        }
    }

    async fn invoke(
        &self,
        arguments: JsonObject,
        cancel: CancellationToken,
    ) -> Result<ToolResult, ToolError> {
        let params: T::Params = serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
        T::validate(&params)?;
        Ok(self.execute(params, &cancel).await)
    }
}
