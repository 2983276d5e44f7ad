//! Header forwarding in both directions.
//!
//! The two directions are deliberately asymmetric:
//! - towards the target every header name is sent once, its values joined
//!   with a single space (lossy for headers whose values contain spaces)
//! - towards the caller every value is appended, so repeated headers such as
//!   `Set-Cookie` keep their multiplicity
//!
//! Hop-by-hop headers belong to a single connection and are never copied.
//! `Host` is recomputed from the target URL by the client.

use axum::http::header::{HeaderMap, HeaderName, HeaderValue, HOST};

const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Build the outbound header set, one space-joined value per name.
pub fn flatten_for_request(inbound: &HeaderMap) -> HeaderMap {
    let mut outbound = HeaderMap::with_capacity(inbound.keys_len());

    for name in inbound.keys() {
        if *name == HOST || is_hop_by_hop(name) {
            continue;
        }
        if let Some(value) = join_values(inbound, name) {
            outbound.insert(name.clone(), value);
        }
    }

    outbound
}

/// Append every upstream header value onto the caller's response headers.
pub fn append_for_response(upstream: &HeaderMap, response: &mut HeaderMap) {
    for (name, value) in upstream.iter() {
        if is_hop_by_hop(name) {
            continue;
        }
        response.append(name.clone(), value.clone());
    }
}

fn join_values(headers: &HeaderMap, name: &HeaderName) -> Option<HeaderValue> {
    let mut values = headers.get_all(name).iter();
    let first = values.next()?;

    let mut rest = values.peekable();
    if rest.peek().is_none() {
        return Some(first.clone());
    }

    let mut sensitive = first.is_sensitive();
    let mut joined = first.as_bytes().to_vec();
    for value in rest {
        joined.push(b' ');
        joined.extend_from_slice(value.as_bytes());
        sensitive |= value.is_sensitive();
    }

    // Joining valid values with a space cannot produce an invalid one.
    let mut value = HeaderValue::from_bytes(&joined).ok()?;
    value.set_sensitive(sensitive);
    Some(value)
}
