//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, CORS, metrics)
//!     → relay.rs (diagnostics short-circuit, error mapping)
//!     → request.rs (target extraction, outbound construction)
//!     → headers.rs (flatten towards target, append towards caller)
//!     → upstream.rs (shared client, streamed bodies)
//!     → response.rs (status, headers, streamed body or JSON error)
//!     → Send to client
//! ```

pub mod error;
pub mod headers;
pub mod relay;
pub mod request;
pub mod request_id;
pub mod response;
pub mod server;
pub mod upstream;

pub use error::RelayError;
pub use relay::Relay;
pub use request_id::X_REQUEST_ID;
pub use server::HttpServer;
pub use upstream::{OutboundRequest, OutboundResponse, ReqwestUpstream, Upstream, UpstreamError};
