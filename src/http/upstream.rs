//! Outbound HTTP client seam.
//!
//! # Responsibilities
//! - Define the `Upstream` capability the relay dispatches through
//! - Provide the production implementation on a shared `reqwest::Client`
//!
//! # Design Decisions
//! - One client per process, built at startup, never mutated afterwards
//! - Default redirect policy and pooling; no timeout, no retries
//! - Bodies stream in both directions; nothing is buffered whole

use std::future::Future;

use axum::body::{Body, HttpBody};
use axum::http::{HeaderMap, Method, StatusCode};
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;

/// Request about to be sent to the target.
#[derive(Debug)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Body,
}

/// Response head and streaming body received from the target.
#[derive(Debug)]
pub struct OutboundResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Body,
}

/// Errors raised by an `Upstream` implementation.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The client refused to build the request.
    #[error("{0}")]
    Build(#[source] reqwest::Error),

    /// Only http and https targets can be dispatched.
    #[error("unsupported protocol scheme {0:?}")]
    UnsupportedScheme(String),

    /// Connect, TLS, or protocol failure while sending.
    #[error("{0}")]
    Send(#[source] reqwest::Error),
}

impl UpstreamError {
    /// True when the request never left the process.
    pub fn is_construction(&self) -> bool {
        matches!(self, UpstreamError::Build(_) | UpstreamError::UnsupportedScheme(_))
    }
}

/// Capability to execute one outbound request.
pub trait Upstream: Send + Sync + 'static {
    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<OutboundResponse, UpstreamError>> + Send;
}

/// `Upstream` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestUpstream {
    client: reqwest::Client,
}

impl ReqwestUpstream {
    /// Build the process-wide client.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder.build().map_err(UpstreamError::Build)?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Upstream for ReqwestUpstream {
    async fn send(&self, request: OutboundRequest) -> Result<OutboundResponse, UpstreamError> {
        let scheme = request.url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(UpstreamError::UnsupportedScheme(scheme.to_string()));
        }

        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        // A known-empty body goes out without framing; anything else streams.
        if request.body.size_hint().exact() != Some(0) {
            builder = builder.body(reqwest::Body::wrap_stream(request.body.into_data_stream()));
        }

        let outbound = builder.build().map_err(UpstreamError::Build)?;
        let mut response = self.client.execute(outbound).await.map_err(UpstreamError::Send)?;

        let status = response.status();
        let headers = std::mem::take(response.headers_mut());
        let body = Body::from_stream(response.bytes_stream());

        Ok(OutboundResponse { status, headers, body })
    }
}
