//! The upstream proxy route.
//!
//! # Responsibilities
//! - Resolve the credential before touching the body or the network
//! - Validate the body as JSON (syntax only)
//! - Forward once, relay the upstream status and JSON body
//! - Convert every failure into the JSON error envelope
//!
//! # Design Decisions
//! - Failures never escape the handler; each becomes a response here
//! - The credential never appears in responses or log fields

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::time::Instant;
use thiserror::Error;

use crate::http::request::request_id;
use crate::http::response::{error_response, json_response};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::upstream::UpstreamError;

/// Failures on the proxy route, each mapped to a status and envelope.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// No usable credential. Carries the variable name to report.
    #[error("{0} is not set. Export it before starting the server.")]
    MissingCredential(String),

    #[error("Request body exceeds {0} bytes")]
    BodyTooLarge(usize),

    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    #[error("Invalid JSON body")]
    InvalidJson,

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] UpstreamError),
}

impl ProxyError {
    /// HTTP status reported for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingCredential(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::BodyRead(_) | Self::InvalidJson => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        error_response(self.status(), self.to_string())
    }
}

/// Handle a POST on the proxy path.
pub async fn forward(state: &AppState, request: Request<Body>) -> Response {
    let started = Instant::now();
    let (parts, body) = request.into_parts();
    let request_id = request_id(&parts.headers).to_string();

    let response = match relay(state, &parts.headers, body).await {
        Ok((status, body)) => {
            tracing::info!(
                request_id = %request_id,
                status = status.as_u16(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Upstream responded"
            );
            json_response(status, &body)
        }
        Err(e) => {
            match &e {
                ProxyError::Upstream(_) => {
                    tracing::error!(request_id = %request_id, error = %e, "Upstream error")
                }
                ProxyError::MissingCredential(_) => {
                    tracing::warn!(request_id = %request_id, "Proxy called without a credential")
                }
                _ => tracing::warn!(request_id = %request_id, error = %e, "Rejected proxy request"),
            }
            e.into_response()
        }
    };

    metrics::record_proxy_request(response.status().as_u16(), started);
    response
}

async fn relay(
    state: &AppState,
    headers: &HeaderMap,
    body: Body,
) -> Result<(StatusCode, Value), ProxyError> {
    let credential = state
        .credentials
        .resolve()
        .ok_or_else(|| ProxyError::MissingCredential(state.credential_env.to_string()))?;

    if let Some(limit) = state.max_body_bytes {
        if declared_length(headers).is_some_and(|len| len > limit) {
            return Err(ProxyError::BodyTooLarge(limit));
        }
    }

    let bytes = axum::body::to_bytes(body, state.max_body_bytes.unwrap_or(usize::MAX))
        .await
        .map_err(|e| ProxyError::BodyRead(e.to_string()))?;

    let payload: Value = serde_json::from_slice(&bytes).map_err(|_| ProxyError::InvalidJson)?;

    let reply = state.upstream.send(&credential, &payload).await?;
    Ok((reply.status, reply.body))
}

fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
