//! HTTP client for the upstream messages API.

use axum::http::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;

use crate::config::{Credential, UpstreamConfig};
use crate::upstream::types::{UpstreamError, UpstreamReply};

/// Header carrying the upstream credential.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying the upstream API version.
pub const API_VERSION_HEADER: &str = "anthropic-version";

/// Client for the single fixed upstream endpoint.
///
/// Cloning is cheap; the connection pool is shared.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    url: String,
    api_version: String,
}

impl UpstreamClient {
    /// Build a client from configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| UpstreamError::Transport(error_chain(&e)))?;

        Ok(Self {
            http,
            url: config.url.clone(),
            api_version: config.api_version.clone(),
        })
    }

    /// POST `body` upstream once. No retries.
    ///
    /// Any HTTP response is a reply, whatever its status. Only a missing
    /// response, or a success body that is not JSON, is an error.
    pub async fn send(
        &self,
        credential: &Credential,
        body: &Value,
    ) -> Result<UpstreamReply, UpstreamError> {
        let payload = serde_json::to_vec(body)
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let response = self
            .http
            .post(&self.url)
            .headers(self.headers(credential)?)
            .body(payload)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(error_chain(&e)))?;

        let status: StatusCode = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(error_chain(&e)))?;

        if status.is_success() {
            let body = serde_json::from_slice(&bytes)
                .map_err(|e| UpstreamError::Decode(e.to_string()))?;
            return Ok(UpstreamReply { status, body });
        }

        let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            serde_json::json!({
                "error": { "message": format!("Anthropic API error {}", status.as_u16()) }
            })
        });
        Ok(UpstreamReply { status, body })
    }

    fn headers(&self, credential: &Credential) -> Result<HeaderMap, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut key = HeaderValue::from_str(credential.expose())
            .map_err(|_| UpstreamError::InvalidCredential)?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let version = HeaderValue::from_str(&self.api_version)
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        headers.insert(API_VERSION_HEADER, version);
        Ok(headers)
    }
}

/// Render an error and every `source()` below it, joined by `": "`.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Layer(&'static str, Option<Box<Layer>>);

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl std::error::Error for Layer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            self.1
                .as_deref()
                .map(|e| e as &(dyn std::error::Error + 'static))
        }
    }

    #[test]
    fn test_error_chain_joins_sources() {
        let err = Layer(
            "error sending request",
            Some(Box::new(Layer(
                "client error (Connect)",
                Some(Box::new(Layer("Connection refused", None))),
            ))),
        );
        assert_eq!(
            error_chain(&err),
            "error sending request: client error (Connect): Connection refused"
        );
    }

    #[test]
    fn test_error_chain_skips_repeated_text() {
        let err = Layer("timed out: deadline", Some(Box::new(Layer("deadline", None))));
        assert_eq!(error_chain(&err), "timed out: deadline");
    }

    #[test]
    fn test_headers_carry_key_and_version() {
        let client = UpstreamClient::new(&UpstreamConfig::default()).unwrap();
        let credential = Credential::new("sk-ant-test").unwrap();
        let headers = client.headers(&credential).unwrap();

        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[API_KEY_HEADER], "sk-ant-test");
        assert!(headers[API_KEY_HEADER].is_sensitive());
        assert_eq!(headers[API_VERSION_HEADER], "2023-06-01");
    }

    #[test]
    fn test_key_with_control_characters_is_rejected() {
        let client = UpstreamClient::new(&UpstreamConfig::default()).unwrap();
        let credential = Credential::new("sk-ant\u{7}bad").unwrap();
        assert!(matches!(
            client.headers(&credential),
            Err(UpstreamError::InvalidCredential)
        ));
    }
}
