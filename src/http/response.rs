//! Response handling and transformation.
//!
//! # Responsibilities
//! - Render relay errors as `{"error": "..."}` JSON bodies
//! - Turn the upstream response into the caller's response
//! - Stream the upstream body without buffering it
//!
//! # Design Decisions
//! - Headers are in place before the first body byte is produced
//! - Once streaming has begun a failure can only be logged; hyper aborts
//!   the connection instead of sending an error body

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::http::error::RelayError;
use crate::http::headers::append_for_response;
use crate::http::upstream::OutboundResponse;
use crate::observability::{EventLog, LogContext};

/// JSON payload written in place of a body on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Build a JSON error response, newline terminated.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    let payload = ErrorBody {
        error: message.to_string(),
    };
    let mut body = serde_json::to_vec(&payload).unwrap_or_else(|_| b"{}".to_vec());
    body.push(b'\n');

    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response()
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        error_response(self.status(), &self.to_string())
    }
}

/// Owned request attributes that outlive the handler while the body streams.
pub struct StreamContext {
    pub method: Method,
    pub path: String,
    pub target: Url,
    pub log: Arc<dyn EventLog>,
}

impl StreamContext {
    fn report(&self, error: &axum::Error) {
        let ctx = LogContext {
            method: &self.method,
            path: &self.path,
            target: Some(&self.target),
        };
        let error = RelayError::Relay(error.to_string());
        self.log.error(&ctx, &error, "failed to write response");
    }
}

/// Convert the upstream response into the caller's response.
///
/// Status and headers are copied first; the body is relayed chunk by chunk and
/// any mid-stream failure is reported through `stream`.
pub fn relay_response(outbound: OutboundResponse, stream: StreamContext) -> Response {
    let OutboundResponse { status, headers, body } = outbound;

    let relayed = body.into_data_stream().inspect_err(move |e| stream.report(e));

    let mut response = Response::new(Body::from_stream(relayed));
    *response.status_mut() = status;
    append_for_response(&headers, response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::HeaderMap;
    use futures_util::stream;

    use crate::observability::logging::memory::{Level, MemoryLog};

    fn context(log: Arc<MemoryLog>) -> StreamContext {
        StreamContext {
            method: Method::GET,
            path: "/http://example.com/".into(),
            target: Url::parse("http://example.com/").unwrap(),
            log,
        }
    }

    #[tokio::test]
    async fn test_error_response_body() {
        let response = RelayError::RootRequest.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"{\"error\":\"root request\"}\n");
    }

    #[tokio::test]
    async fn test_relay_response_copies_head_and_body() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", HeaderValue::from_static("a=1"));
        headers.append("set-cookie", HeaderValue::from_static("b=2"));
        let outbound = OutboundResponse {
            status: StatusCode::CREATED,
            headers,
            body: Body::from("hello world"),
        };
        let log = Arc::new(MemoryLog::default());

        let response = relay_response(outbound, context(log.clone()));
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().get_all("set-cookie").iter().count(), 2);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"hello world");
        assert!(log.records().is_empty());
    }

    #[tokio::test]
    async fn test_mid_stream_failure_is_logged() {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer")),
        ];
        let outbound = OutboundResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Body::from_stream(stream::iter(chunks)),
        };
        let log = Arc::new(MemoryLog::default());

        let response = relay_response(outbound, context(log.clone()));
        assert!(axum::body::to_bytes(response.into_body(), usize::MAX).await.is_err());

        let errors = log.at(Level::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("reset by peer"));
        assert_eq!(errors[0].url.as_deref(), Some("http://example.com/"));
    }
}
