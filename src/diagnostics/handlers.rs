use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::diagnostics::DiagnosticsState;
use crate::http::response::error_response;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub uptime_secs: u64,
}

#[derive(Serialize)]
pub struct Index {
    pub endpoints: Vec<String>,
}

pub async fn get_index(State(state): State<DiagnosticsState>) -> Json<Index> {
    Json(Index {
        endpoints: vec![
            format!("{}status", state.prefix),
            format!("{}metrics", state.prefix),
        ],
    })
}

pub async fn get_status(State(state): State<DiagnosticsState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        uptime_secs: state.started.elapsed().as_secs(),
    })
}

pub async fn get_metrics(State(state): State<DiagnosticsState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; version=0.0.4"),
            )],
            handle.render(),
        )
            .into_response(),
        None => error_response(StatusCode::SERVICE_UNAVAILABLE, "metrics recorder not installed"),
    }
}

pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "unknown diagnostics endpoint")
}
