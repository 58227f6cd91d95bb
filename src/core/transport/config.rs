//! Transport configuration types.

use serde::{Deserialize, Serialize};

use crate::core::config::{parse_flag, parse_or};

/// Transport configuration options.
///
/// STDIO and HTTP are independent: either, or both at once, may be enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Serve MCP over standard input/output.
    pub stdio: bool,

    /// Serve MCP over HTTP when set.
    pub http: Option<HttpConfig>,
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path of the streamable HTTP (SSE) MCP endpoint.
    #[serde(default = "default_mcp_path")]
    pub mcp_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_mcp_path() -> String {
    "/mcp".to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            stdio: true,
            http: None,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: default_host(),
            mcp_path: default_mcp_path(),
            enable_cors: default_cors(),
        }
    }
}

impl TransportConfig {
    /// HTTP only, on the given port.
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self {
            stdio: false,
            http: Some(HttpConfig {
                port,
                host: host.into(),
                ..Default::default()
            }),
        }
    }

    /// Load transport config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let stdio = parse_flag(lookup, "MCP_STDIO", true);

        let http = parse_flag(lookup, "MCP_HTTP", false).then(|| {
            let defaults = HttpConfig::default();
            HttpConfig {
                port: parse_or(lookup, "MCP_HTTP_PORT", defaults.port),
                host: lookup("MCP_HTTP_HOST").unwrap_or(defaults.host),
                mcp_path: lookup("MCP_HTTP_PATH").unwrap_or(defaults.mcp_path),
                enable_cors: parse_flag(lookup, "MCP_HTTP_CORS", defaults.enable_cors),
            }
        });

        Self { stdio, http }
    }

    /// Whether at least one transport is enabled.
    pub fn any_enabled(&self) -> bool {
        self.stdio || self.http.is_some()
    }

    /// Get a description of the enabled transports for logging.
    pub fn description(&self) -> String {
        let mut parts = Vec::new();
        if self.stdio {
            parts.push("STDIO (standard MCP mode)".to_string());
        }
        if let Some(cfg) = &self.http {
            parts.push(format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.mcp_path));
        }
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(" + ")
        }
    }
}

impl HttpConfig {
    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
