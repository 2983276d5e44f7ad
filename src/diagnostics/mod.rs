//! Diagnostics endpoints served under a reserved path prefix.
//!
//! # Routes (relative to the prefix, `/debug/` by default)
//! - the prefix itself: index of endpoints
//! - `status` version and uptime
//! - `metrics` Prometheus text exposition
//!
//! Requests under the prefix are handed over untouched; the relay does not
//! interpret them.

pub mod handlers;

use std::convert::Infallible;
use std::time::Instant;

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;

use self::handlers::*;

/// Shared state for the diagnostics handlers.
#[derive(Clone)]
pub struct DiagnosticsState {
    pub prefix: String,
    pub started: Instant,
    pub metrics: Option<PrometheusHandle>,
}

/// The diagnostics collaborator: a prefix and the router behind it.
#[derive(Clone)]
pub struct Diagnostics {
    prefix: String,
    router: Router,
}

impl Diagnostics {
    /// `prefix` must start and end with '/' (checked by config validation).
    pub fn new(prefix: &str, metrics: Option<PrometheusHandle>) -> Self {
        let state = DiagnosticsState {
            prefix: prefix.to_string(),
            started: Instant::now(),
            metrics,
        };

        let router = Router::new()
            .route(prefix, get(get_index))
            .route(&format!("{}status", prefix), get(get_status))
            .route(&format!("{}metrics", prefix), get(get_metrics))
            .fallback(not_found)
            .with_state(state);

        Self {
            prefix: prefix.to_string(),
            router,
        }
    }

    /// True when `path` falls under the reserved prefix.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// Serve a request under the prefix.
    pub async fn serve(&self, request: Request) -> Response {
        let result: Result<Response, Infallible> = self.router.clone().oneshot(request).await;
        match result {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        }
    }
}
