//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the relay as the catch-all handler
//! - Wire up middleware (request ID, tracing, CORS, metrics)
//! - Serve on a listener until shutdown is signalled

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware,
    response::Response,
    routing::any,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::diagnostics::Diagnostics;
use crate::http::relay::Relay;
use crate::http::request_id::{request_id, MakeRequestUuidV4};
use crate::http::upstream::Upstream;
use crate::observability::{metrics, EventLog, TracingLog};
use crate::security::cors_layer;

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and client.
    pub fn new<U: Upstream>(
        config: &RelayConfig,
        upstream: U,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Self {
        let log: Arc<dyn EventLog> = Arc::new(TracingLog);
        Self::with_log(config, upstream, metrics_handle, log)
    }

    /// Same as `new`, with an explicit log capability for the relay.
    pub fn with_log<U: Upstream>(
        config: &RelayConfig,
        upstream: U,
        metrics_handle: Option<PrometheusHandle>,
        log: Arc<dyn EventLog>,
    ) -> Self {
        let mut relay = Relay::new(upstream, log);
        if config.diagnostics.enabled {
            relay = relay.with_diagnostics(Diagnostics::new(&config.diagnostics.prefix, metrics_handle));
        }

        let router = Self::build_router(Arc::new(relay));
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router<U: Upstream>(relay: Arc<Relay<U>>) -> Router {
        Router::new()
            .route("/{*path}", any(relay_handler::<U>))
            .route("/", any(relay_handler::<U>))
            .with_state(relay)
            .layer(middleware::from_fn(metrics::track_requests))
            .layer(cors_layer())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    request_id = %request_id(request),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn relay_handler<U: Upstream>(State(relay): State<Arc<Relay<U>>>, request: Request) -> Response {
    relay.handle(request).await
}
