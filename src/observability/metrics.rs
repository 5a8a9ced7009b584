//! Metrics collection and exposition.
//!
//! # Metrics
//! - `canopy_proxy_requests_total` (counter): proxied requests by status
//! - `canopy_proxy_upstream_duration_seconds` (histogram): time spent on
//!   the proxy route, upstream call included
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Exporter is off by default

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Counter of proxy route responses.
pub const PROXY_REQUESTS_TOTAL: &str = "canopy_proxy_requests_total";

/// Histogram of proxy route latency.
pub const PROXY_DURATION_SECONDS: &str = "canopy_proxy_upstream_duration_seconds";

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one finished proxy request.
pub fn record_proxy_request(status: u16, started: Instant) {
    metrics::counter!(PROXY_REQUESTS_TOTAL, "status" => status.to_string()).increment(1);
    metrics::histogram!(PROXY_DURATION_SECONDS).record(started.elapsed().as_secs_f64());
}
