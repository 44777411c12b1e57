//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): responses by status code
//! - `gateway_rate_limited_total` (counter): rejected admissions
//! - `gateway_webhook_failures_total` (counter): failed deliveries

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(status: u16) {
    counter!("gateway_requests_total", "status" => status.to_string()).increment(1);
}

pub fn record_rate_limited() {
    counter!("gateway_rate_limited_total").increment(1);
}

pub fn record_webhook_failure() {
    counter!("gateway_webhook_failures_total").increment(1);
}
