//! Canopy local dev server library.
//!
//! Serves static assets from disk and proxies `POST /api/claude` to the
//! upstream messages API, injecting the server-side API key.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod upstream;

pub use config::schema::ServerConfig;
pub use config::CredentialSource;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
