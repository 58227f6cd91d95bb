//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that is built
//! once at startup and passed explicitly into the server and transports.
//! Values come from environment variables (optionally via a `.env` file) and
//! fall back to defaults.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::transport::TransportConfig;

/// Base URL of the Developer Overheid API.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://apis.developer.overheid.nl/api/v0";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Upstream API configuration.
    pub upstream: UpstreamConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Shutdown behaviour.
    pub shutdown: ShutdownConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Upstream API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL; tool paths such as `/apis` are appended to it.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// `User-Agent` header sent upstream.
    pub user_agent: String,
}

/// Shutdown configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShutdownConfig {
    /// How long in-flight work may continue after a shutdown request.
    pub grace_period_secs: u64,
}

impl ShutdownConfig {
    /// The grace period as a `Duration`.
    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: 5,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "developer-overheid-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            upstream: UpstreamConfig::default(),
            transport: TransportConfig::default(),
            shutdown: ShutdownConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = lookup("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.logging.with_timestamps = parse_flag(
            &lookup,
            "MCP_LOG_TIMESTAMPS",
            config.logging.with_timestamps,
        );

        if let Some(base_url) = lookup("MCP_UPSTREAM_BASE_URL") {
            info!("Upstream base URL overridden: {}", base_url);
            config.upstream.base_url = base_url;
        }

        config.upstream.timeout_secs = parse_or(
            &lookup,
            "MCP_UPSTREAM_TIMEOUT_SECS",
            config.upstream.timeout_secs,
        );

        config.shutdown.grace_period_secs = parse_or(
            &lookup,
            "MCP_SHUTDOWN_GRACE_SECS",
            config.shutdown.grace_period_secs,
        );

        // Load transport configuration
        config.transport = TransportConfig::from_lookup(&lookup);

        config
    }
}

/// Parse `key` with `FromStr`, keeping `default` when unset or invalid.
pub(crate) fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Debug,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value {:?} for {}, using {:?}", raw, key, default);
            default
        }),
    }
}

/// Parse a boolean flag (`true/false`, `1/0`, `yes/no`, `on/off`).
pub(crate) fn parse_flag<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            warn!("Invalid value {:?} for {}, using {}", raw, key, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.upstream.base_url, DEFAULT_UPSTREAM_BASE_URL);
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.shutdown.grace_period(), Duration::from_secs(5));
        assert_eq!(config.logging.level, "info");
        assert!(config.transport.stdio);
        assert!(config.transport.http.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("MCP_SERVER_NAME", "overheid"),
            ("MCP_LOG_LEVEL", "debug"),
            ("MCP_LOG_TIMESTAMPS", "off"),
            ("MCP_UPSTREAM_BASE_URL", "http://localhost:9999/api"),
            ("MCP_UPSTREAM_TIMEOUT_SECS", "7"),
            ("MCP_SHUTDOWN_GRACE_SECS", "2"),
        ]));
        assert_eq!(config.server.name, "overheid");
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.with_timestamps);
        assert_eq!(config.upstream.base_url, "http://localhost:9999/api");
        assert_eq!(config.upstream.timeout_secs, 7);
        assert_eq!(config.shutdown.grace_period_secs, 2);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("MCP_UPSTREAM_TIMEOUT_SECS", "soon"),
            ("MCP_SHUTDOWN_GRACE_SECS", "-1"),
        ]));
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.shutdown.grace_period_secs, 5);
    }

    #[test]
    fn test_parse_flag() {
        let vars = lookup(&[("A", "YES"), ("B", "0"), ("C", "maybe")]);
        assert!(parse_flag(&vars, "A", false));
        assert!(!parse_flag(&vars, "B", true));
        assert!(parse_flag(&vars, "C", true));
        assert!(!parse_flag(&vars, "MISSING", false));
    }

    #[test]
    fn test_user_agent_names_crate() {
        let config = UpstreamConfig::default();
        assert!(config.user_agent.starts_with("overheid_mcp_server/"));
    }
}
