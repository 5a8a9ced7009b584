//! Upstream reply and error types.

use axum::http::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// An HTTP response received from the upstream, success or not.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    /// Status exactly as the upstream sent it.
    pub status: StatusCode,
    /// Parsed body, or a synthesized error envelope for unparsable errors.
    pub body: Value,
}

/// Failures that produced no usable upstream response.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// DNS, connect, TLS, timeout or body read failure.
    #[error("{0}")]
    Transport(String),

    /// The upstream answered 2xx with a body that is not JSON.
    #[error("invalid JSON in upstream response: {0}")]
    Decode(String),

    /// The credential cannot be carried in an HTTP header.
    #[error("credential is not a valid header value")]
    InvalidCredential,
}
