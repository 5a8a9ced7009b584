//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dev server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default upstream endpoint for message completions.
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.anthropic.com/v1/messages";

/// Upstream API version sent with every proxied request.
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

/// Environment variable holding the upstream credential.
pub const DEFAULT_CREDENTIAL_ENV: &str = "ANTHROPIC_API_KEY";

/// Root configuration for the dev server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Upstream API settings.
    pub upstream: UpstreamConfig,

    /// Proxy route settings.
    pub proxy: ProxyRouteConfig,

    /// Static asset settings.
    pub static_files: StaticFilesConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ServerConfig {
    /// The `host:port` string the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.host, self.listener.port)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port. Zero picks an ephemeral port.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Full URL proxied requests are POSTed to.
    pub url: String,

    /// Value of the `anthropic-version` header.
    pub api_version: String,

    /// Optional upstream timeout in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,

    /// Environment variable the credential is read from.
    pub credential_env: String,

    /// Honor `HTTPS_PROXY`/`HTTP_PROXY` for the upstream call.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPSTREAM_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: None,
            credential_env: DEFAULT_CREDENTIAL_ENV.to_string(),
            use_system_proxy: true,
        }
    }
}

/// Proxy route configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyRouteConfig {
    /// Path that POST requests are proxied from.
    pub path: String,

    /// Optional cap on the request body in bytes. `None` forwards any size.
    pub max_body_bytes: Option<usize>,
}

impl Default for ProxyRouteConfig {
    fn default() -> Self {
        Self {
            path: "/api/claude".to_string(),
            max_body_bytes: None,
        }
    }
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory served for GET/HEAD requests.
    pub root: PathBuf,

    /// Serve `index.html` when a directory is requested.
    pub index: bool,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            index: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
