//! Client error types.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Message surfaced when a session can no longer be refreshed.
pub const SESSION_EXPIRED_MESSAGE: &str = "Sesi login berakhir, silakan login kembali";

/// Client error type.
///
/// Every variant displays as the human-readable message callers show to
/// users; [`Error::status`] exposes the HTTP status where one exists.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned a non-2xx response.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body, or a fallback.
        message: String,
    },

    /// The session could not be refreshed. Both stored tokens were cleared.
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,

    /// An auth endpoint answered successfully but without both tokens.
    #[error("Token tidak ditemukan pada response {0}")]
    MissingTokens(&'static str),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build an API error from a failed response's status and parsed payload.
    pub(crate) fn from_response(status: u16, payload: &Value) -> Self {
        Error::Api {
            status,
            message: extract_error_message(payload, status),
        }
    }

    /// HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::SessionExpired => Some(401),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { status: 404, .. })
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::SessionExpired | Error::Api { status: 401, .. })
    }

    /// Check if the session expired and the user must log in again.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::SessionExpired)
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The `message` field of an error body: a single string or a list of
/// validation messages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Single(String),
    List(Vec<String>),
}

impl ErrorMessage {
    /// Normalize to display text. An empty single message counts as absent.
    pub fn into_text(self) -> Option<String> {
        match self {
            ErrorMessage::Single(text) if text.is_empty() => None,
            ErrorMessage::Single(text) => Some(text),
            ErrorMessage::List(texts) => Some(texts.join(", ")),
        }
    }
}

/// Error response body from the server.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub message: Option<ErrorMessage>,
}

/// Extract a display message from an error payload.
///
/// Falls back to `Request failed (<status>)` when the payload carries no
/// usable `message` field.
pub(crate) fn extract_error_message(payload: &Value, status: u16) -> String {
    ErrorResponse::deserialize(payload)
        .ok()
        .and_then(|body| body.message)
        .and_then(ErrorMessage::into_text)
        .unwrap_or_else(|| format!("Request failed ({})", status))
}
