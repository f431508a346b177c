//! Error types for API calls.

use serde_json::Value;
use stampdesk_core::EnvelopeError;
use thiserror::Error;

use crate::session::SessionError;

/// Errors that can occur when calling the REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout, TLS...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the session token (401/403).
    #[error("Unauthorized: session expired or rejected (HTTP {status})")]
    Unauthorized { status: u16 },

    /// Any other non-2xx response.
    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
        /// Error payload as sent by the server, if it was JSON.
        body: Option<Value>,
    },

    /// A 2xx response whose envelope carried no payload.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// The payload did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request body could not be serialized.
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The endpoint could not be joined onto the base URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// The session store failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// Whether this error means the user must sign in again.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status } | Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Pull a human-readable message out of an error payload.
///
/// Looks at `message`, then `error`, then `data.message`.
pub(crate) fn error_message(body: &Value) -> Option<String> {
    [
        body.get("message"),
        body.get("error"),
        body.get("data").and_then(|d| d.get("message")),
    ]
    .into_iter()
    .flatten()
    .find_map(|v| v.as_str().filter(|m| !m.is_empty()).map(str::to_string))
}
