//! Cross-origin policy applied in front of the relay.
//!
//! # Policy
//! - Any origin, echoed back so credentials are allowed
//! - Any request header, echoed back on preflight
//! - Methods GET, HEAD, POST, PUT, DELETE, PATCH
//!
//! Preflight requests are answered here and never reach the relay.

use axum::http::Method;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

/// Methods advertised on preflight.
pub const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
];

/// Build the permissive CORS layer.
///
/// `*` cannot be combined with credentials, so origin and headers are
/// mirrored from the request instead.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_methods(ALLOWED_METHODS)
        .allow_credentials(true)
}
