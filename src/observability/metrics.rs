//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by route, status
//! - `relay_request_duration_seconds` (histogram): latency by route
//! - `relay_upstream_requests_total` (counter): upstream calls by path, outcome
//! - `relay_upstream_duration_seconds` (histogram): upstream latency by path
//! - `relay_part_requests_total` (counter): part requests by outcome
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(route: &str, status: u16, start: Instant) {
    let route = route.to_string();
    counter!(
        "relay_requests_total",
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("relay_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream(path: &str, outcome: &str, start: Instant) {
    let path = path.to_string();
    counter!(
        "relay_upstream_requests_total",
        "path" => path.clone(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
    histogram!("relay_upstream_duration_seconds", "path" => path)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_part_request(outcome: &'static str) {
    counter!("relay_part_requests_total", "outcome" => outcome).increment(1);
}
