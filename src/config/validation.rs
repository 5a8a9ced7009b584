//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the upstream URL and API version
//! - Validate the proxy route and body limit
//! - Check the static root and metrics address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - A missing static root is accepted; every static lookup is then a 404

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::ServerConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("upstream.url is not a valid URL: {0}")]
    InvalidUpstreamUrl(String),

    #[error("upstream.url must use http or https, got {0}")]
    UnsupportedScheme(String),

    #[error("upstream.api_version must not be empty")]
    EmptyApiVersion,

    #[error("upstream.credential_env must not be empty")]
    EmptyCredentialEnv,

    #[error("proxy.path must start with '/', got {0:?}")]
    InvalidProxyPath(String),

    #[error("proxy.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("static_files.root is not a directory: {0}")]
    StaticRootNotDirectory(String),

    #[error("observability.metrics_address is not a socket address: {0}")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.upstream.url) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            errors.push(ValidationError::UnsupportedScheme(url.scheme().to_string()));
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidUpstreamUrl(e.to_string())),
    }

    if config.upstream.api_version.trim().is_empty() {
        errors.push(ValidationError::EmptyApiVersion);
    }

    if config.upstream.credential_env.trim().is_empty() {
        errors.push(ValidationError::EmptyCredentialEnv);
    }

    if !config.proxy.path.starts_with('/') {
        errors.push(ValidationError::InvalidProxyPath(config.proxy.path.clone()));
    }

    if config.proxy.max_body_bytes == Some(0) {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let root = &config.static_files.root;
    if root.exists() && !root.is_dir() {
        errors.push(ValidationError::StaticRootNotDirectory(
            root.display().to_string(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
