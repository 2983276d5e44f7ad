//! Inbound request translation.
//!
//! # Responsibilities
//! - Extract the target URL embedded in the inbound path
//! - Default the scheme to http when none is given
//! - Build the outbound request (method, headers, streamed body)
//!
//! # Design Decisions
//! - The raw path and query are parsed as one URL, so query strings and
//!   further path segments reach the target unchanged
//! - The body is handed over as a stream, never buffered

use axum::body::Body;
use axum::http::request::Parts;
use url::Url;

use crate::http::error::{RelayError, RelayResult};
use crate::http::headers::flatten_for_request;
use crate::http::upstream::OutboundRequest;

/// Scheme prepended when the embedded target has none.
pub const DEFAULT_SCHEME: &str = "http";

const SUPPORTED_SCHEMES: &[&str] = &["http", "https"];

/// Extract the target URL from an inbound path-and-query such as
/// `/https://api.example.com/widgets?color=red`.
pub fn extract_target(path_and_query: &str) -> RelayResult<Url> {
    let raw = path_and_query.strip_prefix('/').unwrap_or(path_and_query);
    // A query on `/` still leaves nothing to relay to.
    if raw.is_empty() || raw.starts_with('?') {
        return Err(RelayError::RootRequest);
    }

    let candidate = if has_scheme(raw) {
        raw.to_string()
    } else {
        format!("{}://{}", DEFAULT_SCHEME, raw)
    };

    Url::parse(&candidate).map_err(|source| RelayError::MalformedTarget {
        target: candidate,
        source,
    })
}

/// True when `text` starts with `scheme://`, scheme per RFC 3986.
fn has_scheme(text: &str) -> bool {
    let Some((scheme, _)) = text.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Build the outbound request: same method, target URL, flattened headers,
/// and the inbound body stream.
pub fn build_outbound(parts: &Parts, target: Url, body: Body) -> RelayResult<OutboundRequest> {
    if !SUPPORTED_SCHEMES.contains(&target.scheme()) {
        return Err(RelayError::RequestConstruction(format!(
            "unsupported protocol scheme {:?}",
            target.scheme()
        )));
    }

    Ok(OutboundRequest {
        method: parts.method.clone(),
        url: target,
        headers: flatten_for_request(&parts.headers),
        body,
    })
}
