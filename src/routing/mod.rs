//! Request routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, path)
//!     → router.rs (dispatch table)
//!     → Route::{Preflight, Proxy, NotFound, Static}
//!     → http::server handles the chosen route
//! ```
//!
//! # Design Decisions
//! - Pure function of method and path, no request body access
//! - Exact, case-sensitive path comparison for the proxy route

pub mod router;

pub use router::{Route, Router};
