//! Upstream messages API subsystem.
//!
//! # Data Flow
//! ```text
//! proxy handler
//!     → client.rs (inject x-api-key + anthropic-version, POST once)
//!     → upstream API
//!     → types.rs (UpstreamReply for any HTTP status, UpstreamError otherwise)
//! ```
//!
//! # Design Decisions
//! - Exactly one request per call; no retries
//! - No timeout unless `upstream.timeout_secs` is configured
//! - Non-2xx bodies that are not JSON are replaced by a synthesized envelope

pub mod client;
pub mod types;

pub use client::{error_chain, UpstreamClient, API_KEY_HEADER, API_VERSION_HEADER};
pub use types::{UpstreamError, UpstreamReply};
