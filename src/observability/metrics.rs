//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by type and outcome
//! - `relay_request_duration_seconds` (histogram): handler latency by type
//! - `relay_active_connections` (gauge): open WebSocket connections
//! - `relay_malformed_frames_total` (counter): frames that were not JSON
//! - `relay_upstream_responses_total` (counter): provider responses by status
//! - `relay_upstream_errors_total` (counter): provider transport failures
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    describe_metrics();
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

fn describe_metrics() {
    describe_counter!("relay_requests_total", "Requests dispatched, by type and outcome");
    describe_histogram!(
        "relay_request_duration_seconds",
        "Time from dispatch to reply, by request type"
    );
    describe_gauge!("relay_active_connections", "Open WebSocket connections");
    describe_counter!("relay_malformed_frames_total", "Inbound frames that were not JSON");
    describe_counter!(
        "relay_upstream_responses_total",
        "Stat provider responses, by HTTP status"
    );
    describe_counter!(
        "relay_upstream_errors_total",
        "Stat provider requests that failed before a response"
    );
}

/// Record a dispatched request.
pub fn record_request(request_type: &str, outcome: &'static str, start: Instant) {
    counter!(
        "relay_requests_total",
        "type" => request_type.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!(
        "relay_request_duration_seconds",
        "type" => request_type.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_malformed_frame() {
    counter!("relay_malformed_frames_total").increment(1);
}

pub fn set_active_connections(count: usize) {
    gauge!("relay_active_connections").set(count as f64);
}

pub fn record_upstream_status(status: u16) {
    counter!("relay_upstream_responses_total", "status" => status.to_string()).increment(1);
}

pub fn record_upstream_error() {
    counter!("relay_upstream_errors_total").increment(1);
}
