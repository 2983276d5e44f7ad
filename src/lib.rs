//! CORS relay library.
//!
//! Relays `GET /https://api.example.com/widgets` to
//! `https://api.example.com/widgets` and answers with the upstream response
//! plus permissive cross-origin headers.

pub mod config;
pub mod diagnostics;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod security;

pub use config::RelayConfig;
pub use http::{HttpServer, Relay, ReqwestUpstream};
pub use lifecycle::Shutdown;
