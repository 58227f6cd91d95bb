//! Transport service - orchestrates the enabled transports.
//!
//! Every enabled transport runs as its own task. Shutdown happens when Ctrl-C
//! is received, when the shutdown token is cancelled, when a transport fails,
//! or when every transport has finished on its own (for example STDIO reaching
//! end of input with no HTTP listener running).
//!
//! Shutdown is two-phase. The shutdown token makes transports stop accepting
//! work while in-flight tool calls continue. If they have not finished within
//! the grace period (or Ctrl-C is pressed again), the abort token cancels
//! them and the remaining tasks are aborted.

use std::time::Duration;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::{TransportConfig, TransportError, TransportResult};
use crate::core::McpServer;

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "http")]
use super::http::HttpTransport;

/// Transport service - manages the transport layer for the MCP server.
pub struct TransportService {
    config: TransportConfig,
    grace_period: Duration,
    shutdown: CancellationToken,
    abort: CancellationToken,
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: TransportConfig, grace_period: Duration) -> Self {
        Self {
            config,
            grace_period,
            shutdown: CancellationToken::new(),
            abort: CancellationToken::new(),
        }
    }

    /// Token that starts a graceful shutdown when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Log information about the configured transports.
    pub fn log_info(&self) {
        info!("Starting transports: {}", self.config.description());
    }

    /// Start the enabled transports with the given MCP server.
    ///
    /// This method blocks until the transports are shut down.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        self.log_info();

        let mut tasks = self.spawn_transports(&server)?;
        let outcome = self.wait_for_shutdown(&mut tasks).await;

        self.shutdown.cancel();
        server.registry().in_flight().close();
        self.drain(&mut tasks).await;

        outcome
    }

    fn spawn_transports(&self, server: &McpServer) -> TransportResult<JoinSet<TransportResult<()>>> {
        if !self.config.any_enabled() {
            return Err(TransportError::NoTransport);
        }

        let mut tasks = JoinSet::new();

        if self.config.stdio {
            #[cfg(feature = "stdio")]
            tasks.spawn(StdioTransport::run(
                server.clone(),
                self.shutdown.child_token(),
                self.abort.child_token(),
            ));

            #[cfg(not(feature = "stdio"))]
            return Err(TransportError::Unsupported("stdio"));
        }

        if let Some(http) = &self.config.http {
            #[cfg(feature = "http")]
            tasks.spawn(HttpTransport::new(http.clone()).run(
                server.clone(),
                self.shutdown.child_token(),
                self.abort.child_token(),
            ));

            #[cfg(not(feature = "http"))]
            {
                let _ = http;
                return Err(TransportError::Unsupported("http"));
            }
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        let _ = server;

        Ok(tasks)
    }

    /// Wait until Ctrl-C, a transport failure, or every transport finishing.
    async fn wait_for_shutdown(&self, tasks: &mut JoinSet<TransportResult<()>>) -> TransportResult<()> {
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let mut listen_for_ctrl_c = true;

        loop {
            tokio::select! {
                signal = &mut ctrl_c, if listen_for_ctrl_c => match signal {
                    Ok(()) => {
                        info!("Shutdown requested");
                        return Ok(());
                    }
                    Err(e) => {
                        warn!("Failed to listen for Ctrl-C: {}", e);
                        listen_for_ctrl_c = false;
                    }
                },
                () = self.shutdown.cancelled() => {
                    info!("Shutdown token cancelled");
                    return Ok(());
                }
                joined = tasks.join_next() => match joined {
                    None => return Ok(()),
                    Some(Ok(Ok(()))) => {
                        if tasks.is_empty() {
                            info!("All transports finished");
                            return Ok(());
                        }
                    }
                    Some(Ok(Err(e))) => {
                        error!("Transport failed: {}", e);
                        return Err(e);
                    }
                    Some(Err(e)) => {
                        error!("Transport task panicked: {}", e);
                        return Err(TransportError::ServiceError(e.to_string()));
                    }
                },
            }
        }
    }

    /// Give remaining tasks the grace period, then cancel in-flight calls and
    /// abort them.
    async fn drain(&self, tasks: &mut JoinSet<TransportResult<()>>) {
        if tasks.is_empty() {
            return;
        }

        info!(
            "Shutting down server (waiting {:?}). Press Ctrl+C to force quit.",
            self.grace_period
        );

        let wait_all = async {
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => warn!("Transport error during shutdown: {}", e),
                    Err(e) if e.is_cancelled() => {}
                    Err(e) => warn!("Transport task failed during shutdown: {}", e),
                }
            }
        };

        tokio::select! {
            result = tokio::time::timeout(self.grace_period, wait_all) => {
                if result.is_err() {
                    warn!("Grace period elapsed, aborting remaining transports");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("Forced shutdown");
            }
        }

        self.abort.cancel();
        tasks.abort_all();
        while tasks.join_next().await.is_some() {}
    }
}
