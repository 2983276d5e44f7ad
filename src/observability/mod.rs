//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! relay handler
//!     → EventLog (logging.rs) → tracing subscriber → stdout (JSON or pretty)
//! middleware
//!     → metrics.rs (counters, histograms) → Prometheus handle
//!     → tower-http TraceLayer (one span per request, x-request-id)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Logging reaches the relay as an injected capability
//! - Metrics are rendered by the diagnostics endpoint

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, EventLog, LogContext, TracingLog};
