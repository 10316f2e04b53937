//! Error types shared by the whole crate.
//!
//! A missing remote resource is *not* an error: managers turn a 404 into
//! `Ok(None)`. Everything listed here propagates to the caller untouched.

use serde_json::Value;

/// Result alias used throughout the crate.
pub type Res<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller broke a precondition (empty id, too many ids, bad color, ...).
    /// Raised before any request is sent.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// The API answered with a non-2xx status other than 404.
    #[error("unexpected response ({status}): {message}")]
    Unexpected {
        status: u16,
        message: String,
        /// Response body, when it was valid JSON.
        body: Option<Value>,
    },

    /// Transport level failure (connection, TLS, body read).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A payload did not have the expected shape.
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Error::Precondition(message.into())
    }

    /// True for the failure class the API docs call "unexpected": bad
    /// statuses, transport failures and malformed payloads.
    pub fn is_unexpected(&self) -> bool {
        matches!(
            self,
            Error::Unexpected { .. } | Error::Http(_) | Error::Decode(_)
        )
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Unexpected { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
