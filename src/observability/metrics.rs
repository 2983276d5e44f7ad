//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): relayed requests by method, status
//! - `relay_request_duration_seconds` (histogram): time until response head
//!
//! # Design Decisions
//! - Recorded by middleware, so the relay core stays free of globals
//! - Exposed through the diagnostics endpoint, not a separate listener

use std::time::Instant;

use axum::{extract::Request, http::Method, middleware::Next, response::Response};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::security::cors::ALLOWED_METHODS;

pub const REQUESTS_TOTAL: &str = "relay_requests_total";
pub const REQUEST_DURATION: &str = "relay_request_duration_seconds";

/// Install the global Prometheus recorder and return its render handle.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, start_time: Instant) {
    metrics::counter!(
        REQUESTS_TOTAL,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(REQUEST_DURATION, "method" => method.to_string())
        .record(start_time.elapsed().as_secs_f64());
}

/// Label for `method`. Tokens outside the CORS verbs and OPTIONS share
/// `OTHER`, keeping the series count bounded.
pub fn method_label(method: &Method) -> &str {
    if *method == Method::OPTIONS || ALLOWED_METHODS.contains(method) {
        method.as_str()
    } else {
        "OTHER"
    }
}

/// Middleware recording request count and latency.
///
/// Latency stops at the response head; streamed bodies are not included.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = method_label(request.method()).to_string();

    let response = next.run(request).await;

    record_request(&method, response.status().as_u16(), start_time);
    response
}
