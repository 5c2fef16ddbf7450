//! Error types for backend requests.

use thiserror::Error;

/// Errors that can occur when talking to a role backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP request itself failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered non-2xx; `message` is the server's own
    /// `error`/`error_message` text when present, else the per-endpoint
    /// fallback.
    #[error("{message}")]
    Api { message: String },

    /// A 2xx body failed to decode.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// An endpoint path could not be joined onto the base URL.
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// The request was superseded before its result was committed.
    ///
    /// Not a user-facing error; callers drop it silently.
    #[error("request superseded")]
    Cancelled,
}

/// Outcome of a user-initiated write (submit order, add item, upload menu
/// item).
///
/// Validation failures are detected client-side and block the action before
/// any network call; request failures carry the server's message verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Request(String),
}

impl ActionError {
    /// The message to surface to a person.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(m) | Self::Request(m) => m,
        }
    }
}

impl ApiError {
    /// The message to surface to a person.
    ///
    /// Server-provided messages pass through verbatim; transport and decode
    /// failures collapse to their display form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether this outcome should be dropped without surfacing anything.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
