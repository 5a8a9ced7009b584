//! CORS headers attached to every response.
//!
//! The browser client is served from the same dev server, but the proxy
//! route is also called cross-origin, so the headers are unconditional.

use axum::http::{header, HeaderMap, HeaderValue};

/// `Access-Control-Allow-Origin` value.
pub const ALLOW_ORIGIN: &str = "*";

/// `Access-Control-Allow-Methods` value.
pub const ALLOW_METHODS: &str = "POST, OPTIONS";

/// `Access-Control-Allow-Headers` value.
pub const ALLOW_HEADERS: &str = "Content-Type";

/// The three CORS headers as name/value pairs.
pub fn cors_headers() -> [(header::HeaderName, HeaderValue); 3] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ),
    ]
}

/// Insert the CORS headers, replacing any existing values.
pub fn apply(headers: &mut HeaderMap) {
    for (name, value) in cors_headers() {
        headers.insert(name, value);
    }
}
