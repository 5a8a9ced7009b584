//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (proxy counters and latency)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Prometheus scrape (when enabled)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through all request log lines
//! - The upstream credential is never a log field

pub mod logging;
pub mod metrics;

pub use logging::init_tracing;
