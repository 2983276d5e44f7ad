//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the process-wide subscriber (JSON or human-readable)
//! - Provide the `EventLog` capability handed to the relay
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format by default, pretty format when requested
//! - Log level configurable via `RUST_LOG`, falling back to config

use axum::http::Method;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

use crate::config::LoggingConfig;

/// Install the global tracing subscriber.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let registry = tracing_subscriber::registry().with(filter);
    if config.pretty {
        registry.with(tracing_subscriber::fmt::layer().compact()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
            .init();
    }
}

/// Request attributes attached to every relay log event.
#[derive(Debug, Clone, Copy)]
pub struct LogContext<'a> {
    pub method: &'a Method,
    /// Inbound path and query, as received.
    pub path: &'a str,
    /// Parsed target, once extraction has succeeded.
    pub target: Option<&'a Url>,
}

impl LogContext<'_> {
    fn target_str(&self) -> &str {
        self.target.map(Url::as_str).unwrap_or("")
    }
}

/// Logging capability injected into the relay.
pub trait EventLog: Send + Sync {
    fn info(&self, ctx: &LogContext<'_>, message: &str);
    fn warn(&self, ctx: &LogContext<'_>, message: &str);
    fn error(&self, ctx: &LogContext<'_>, error: &(dyn std::error::Error + 'static), message: &str);
}

/// `EventLog` backed by the global `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl EventLog for TracingLog {
    fn info(&self, ctx: &LogContext<'_>, message: &str) {
        tracing::info!(
            method = %ctx.method,
            path = %ctx.path,
            url = %ctx.target_str(),
            "{}", message
        );
    }

    fn warn(&self, ctx: &LogContext<'_>, message: &str) {
        tracing::warn!(
            method = %ctx.method,
            path = %ctx.path,
            url = %ctx.target_str(),
            "{}", message
        );
    }

    fn error(&self, ctx: &LogContext<'_>, error: &(dyn std::error::Error + 'static), message: &str) {
        tracing::error!(
            method = %ctx.method,
            path = %ctx.path,
            url = %ctx.target_str(),
            error = %error,
            "{}", message
        );
    }
}
