//! Response envelopes.
//!
//! # Responsibilities
//! - Write JSON bodies with exact `Content-Length`
//! - Build the `{"error": {"message": ...}}` envelope
//! - Build empty responses (preflight, unknown POST)
//!
//! # Design Decisions
//! - Every envelope attaches CORS headers itself; the router layer only
//!   fills them in for responses that bypass this module (static files)

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use serde_json::{json, Value};

use crate::http::cors;

/// Build the uniform error body.
pub fn error_body(message: impl Into<String>) -> Value {
    json!({ "error": { "message": message.into() } })
}

/// Serialize `body` and wrap it in a response with CORS headers.
pub fn json_response(status: StatusCode, body: &Value) -> Response {
    let (status, payload) = match serde_json::to_vec(body) {
        Ok(payload) => (status, payload),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response body");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                br#"{"error":{"message":"Failed to serialize response"}}"#.to_vec(),
            )
        }
    };

    let length = payload.len();
    let mut response = Response::new(Body::from(payload));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    cors::apply(headers);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    response
}

/// An error envelope response.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    json_response(status, &error_body(message))
}

/// An empty-bodied response with CORS headers.
pub fn empty_response(status: StatusCode) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    cors::apply(response.headers_mut());
    response
}
