//! The relay: one inbound request in, one outbound request out, and back.
//!
//! # Pipeline
//! ```text
//! inbound request
//!     → diagnostics prefix?  → Diagnostics (handed over untouched)
//!     → extract_target        (RootRequest / MalformedTarget → 400)
//!     → build_outbound        (RequestConstruction → 500)
//!     → Upstream::send        (Dispatch → 500, never retried)
//!     → relay_response        (status + appended headers, streamed body)
//! ```
//!
//! The relay holds no mutable state; concurrent calls share only the
//! upstream client and the log capability. Inbound and outbound bodies are
//! owned values and are dropped on every exit path.

use std::sync::Arc;

use axum::extract::Request;
use axum::response::{IntoResponse, Response};

use crate::diagnostics::Diagnostics;
use crate::http::error::RelayError;
use crate::http::request::{build_outbound, extract_target};
use crate::http::response::{relay_response, StreamContext};
use crate::http::upstream::Upstream;
use crate::observability::{EventLog, LogContext};

/// Relays requests whose path embeds the target URL.
pub struct Relay<U> {
    upstream: U,
    log: Arc<dyn EventLog>,
    diagnostics: Option<Diagnostics>,
}

impl<U: Upstream> Relay<U> {
    pub fn new(upstream: U, log: Arc<dyn EventLog>) -> Self {
        Self {
            upstream,
            log,
            diagnostics: None,
        }
    }

    /// Hand requests under the diagnostics prefix to `diagnostics`.
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Handle one inbound request.
    pub async fn handle(&self, request: Request) -> Response {
        if let Some(diagnostics) = &self.diagnostics {
            if diagnostics.matches(request.uri().path()) {
                return diagnostics.serve(request).await;
            }
        }

        let (parts, body) = request.into_parts();
        let method = parts.method.clone();
        let path = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/")
            .to_string();

        let mut ctx = LogContext {
            method: &method,
            path: &path,
            target: None,
        };

        let target = match extract_target(&path) {
            Ok(target) => target,
            Err(err) => return self.fail(&ctx, err),
        };
        ctx.target = Some(&target);

        let outbound = match build_outbound(&parts, target.clone(), body) {
            Ok(outbound) => outbound,
            Err(err) => return self.fail(&ctx, err),
        };

        let response = match self.upstream.send(outbound).await {
            Ok(response) => response,
            Err(err) if err.is_construction() => {
                return self.fail(&ctx, RelayError::RequestConstruction(err.to_string()));
            }
            Err(err) => return self.fail(&ctx, RelayError::Dispatch(err)),
        };

        self.log
            .info(&ctx, &format!("relaying upstream response {}", response.status));

        let stream = StreamContext {
            method,
            path,
            target,
            log: self.log.clone(),
        };
        relay_response(response, stream)
    }

    fn fail(&self, ctx: &LogContext<'_>, err: RelayError) -> Response {
        match &err {
            RelayError::RootRequest => self.log.warn(ctx, "root request"),
            RelayError::MalformedTarget { .. } => self.log.error(ctx, &err, "failed to parse url"),
            RelayError::RequestConstruction(_) => {
                self.log.error(ctx, &err, "failed to create proxy request")
            }
            RelayError::Dispatch(_) => self.log.error(ctx, &err, "failed to send proxy request"),
            RelayError::Relay(_) => self.log.error(ctx, &err, "failed to write response"),
        }
        err.into_response()
    }
}
