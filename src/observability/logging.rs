//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Pick the log filter from `RUST_LOG` or configuration
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level when set
//! - The configured level applies to this crate and tower_http only

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives for a configured log level.
pub fn default_directives(log_level: &str) -> String {
    format!("canopy_dev_server={0},tower_http={0}", log_level)
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
