//! Per-request failure taxonomy.

use axum::http::StatusCode;
use thiserror::Error;

use crate::http::upstream::UpstreamError;

/// Everything that can go wrong while relaying one request.
///
/// None of these are fatal to the process.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The inbound path was `/` with nothing to relay to.
    #[error("root request")]
    RootRequest,

    /// The text after the leading `/` is not an absolute URL.
    #[error("parse {target:?}: {source}")]
    MalformedTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },

    /// The outbound request could not be built (method, scheme).
    #[error("failed to create proxy request: {0}")]
    RequestConstruction(String),

    /// The outbound call failed before a response head arrived.
    #[error("failed to send proxy request: {0}")]
    Dispatch(#[source] UpstreamError),

    /// Copying the upstream body to the caller failed mid-stream.
    #[error("failed to relay response body: {0}")]
    Relay(String),
}

impl RelayError {
    /// Status code paired with the JSON error body.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::RootRequest | RelayError::MalformedTarget { .. } => StatusCode::BAD_REQUEST,
            RelayError::RequestConstruction(_) | RelayError::Dispatch(_) | RelayError::Relay(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;
