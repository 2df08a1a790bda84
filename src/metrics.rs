//! Request and probe metrics.
//!
//! Recorded through the `metrics` facade; nothing is exported unless a
//! recorder is installed by the embedding process.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

use crate::probe::ProbeOutcome;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Probe attempts counter metric name.
pub const METRIC_PROBE_ATTEMPTS: &str = "probe_attempts_total";
/// Login attempts counter metric name.
pub const METRIC_LOGIN_ATTEMPTS: &str = "login_attempts_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests served");
    describe_counter!(
        METRIC_PROBE_ATTEMPTS,
        "Total number of address probes by outcome"
    );
    describe_counter!(
        METRIC_LOGIN_ATTEMPTS,
        "Total number of smoke-test login attempts by result"
    );

    debug!("Metrics initialized");
}

/// Record a served HTTP request.
pub fn record_http_request(start: Instant, path: &str, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "path" => path.to_string()).record(latency_ms);
    counter!(
        METRIC_HTTP_REQUESTS,
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Increment the probe attempts counter for an outcome.
pub fn inc_probe_attempts(outcome: ProbeOutcome) {
    counter!(METRIC_PROBE_ATTEMPTS, "outcome" => outcome.to_string()).increment(1);
}

/// Increment the login attempts counter.
pub fn inc_login_attempts(success: bool) {
    let result = if success { "success" } else { "failure" };
    counter!(METRIC_LOGIN_ATTEMPTS, "result" => result).increment(1);
}

