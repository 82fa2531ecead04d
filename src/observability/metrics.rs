//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gogive_requests_total` (counter): requests by outcome
//! - `gogive_request_duration_seconds` (histogram): handler latency
//! - `gogive_reloads_total` (counter): reload attempts by result
//! - `gogive_routes` (gauge): routes in the published table
//!
//! Without an installed recorder every call here is a no-op, so tests and
//! metrics-less deployments pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// How a discovery request was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Import,
    Redirect,
    NotFound,
    MethodNotAllowed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Import => "import",
            Outcome::Redirect => "redirect",
            Outcome::NotFound => "not_found",
            Outcome::MethodNotAllowed => "method_not_allowed",
        }
    }
}

/// Install the Prometheus recorder and its scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(outcome: Outcome, start: Instant) {
    metrics::counter!("gogive_requests_total", "outcome" => outcome.as_str()).increment(1);
    metrics::histogram!("gogive_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_reload(success: bool) {
    let result = if success { "success" } else { "failure" };
    metrics::counter!("gogive_reloads_total", "result" => result).increment(1);
}

pub fn set_routes(count: usize) {
    metrics::gauge!("gogive_routes").set(count as f64);
}
