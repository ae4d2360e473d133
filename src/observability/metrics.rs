//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_upstream_requests_total` (counter): upstream calls by jurisdiction, status
//! - `relay_upstream_duration_seconds` (histogram): upstream latency by jurisdiction
//! - `relay_validation_failures_total` (counter): rejected inbound queries by jurisdiction
//!
//! Status `0` marks a call that never got a response (connect error, timeout).

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_upstream(jurisdiction: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "relay_upstream_requests_total",
        "jurisdiction" => jurisdiction,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "relay_upstream_duration_seconds",
        "jurisdiction" => jurisdiction
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_validation_failure(jurisdiction: &'static str) {
    metrics::counter!(
        "relay_validation_failures_total",
        "jurisdiction" => jurisdiction
    )
    .increment(1);
}
