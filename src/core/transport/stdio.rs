//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP - the default and recommended mode.

use rmcp::ServiceExt;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until the client disconnects or shutdown
    /// completes.
    ///
    /// After `shutdown` is cancelled the service keeps running until the
    /// registry's in-flight tool calls have finished; `abort` cancels them
    /// and stops the service at once.
    pub async fn run(
        server: McpServer,
        shutdown: CancellationToken,
        abort: CancellationToken,
    ) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let registry = server.registry().clone();
        let service_ct = abort.child_token();

        let service = server
            .serve_with_ct(rmcp::transport::stdio(), service_ct.clone())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let waiting = service.waiting();
        tokio::pin!(waiting);

        tokio::select! {
            reason = &mut waiting => {
                let reason = reason.map_err(|e| TransportError::ServiceError(e.to_string()))?;
                info!("STDIO transport finished: {:?}", reason);
                return Ok(());
            }
            () = shutdown.cancelled() => {}
        }

        info!(
            "STDIO transport stopping, {} tool call(s) in flight",
            registry.in_flight().len()
        );
        registry.in_flight().close();
        registry.in_flight().wait().await;
        service_ct.cancel();

        let reason = waiting
            .await
            .map_err(|e| TransportError::ServiceError(e.to_string()))?;

        info!("STDIO transport finished: {:?}", reason);
        Ok(())
    }
}
