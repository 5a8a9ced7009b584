//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, dispatch)
//!     → request.rs (request ID)
//!     → routing layer picks Preflight / Proxy / NotFound / Static
//!     → proxy.rs (credential, JSON validation, upstream relay)
//!     → response.rs + cors.rs (envelope, CORS headers)
//!     → Send to client
//! ```

pub mod cors;
pub mod proxy;
pub mod request;
pub mod response;
pub mod server;

pub use proxy::ProxyError;
pub use request::{request_id, UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
