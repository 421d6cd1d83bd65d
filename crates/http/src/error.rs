//! Error type for calls to the book backend

use thiserror::Error;

/// Why a backend call did not succeed.
///
/// Handlers collapse every variant into a single "request failed" case;
/// the variants only exist so logs can say what happened.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("backend answered with HTTP status {status}")]
    Status { status: u16 },

    #[error("request failed: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("path segment '{0}' cannot be sent as a single segment")]
    InvalidSegment(String),

    #[error("backend url '{0}' cannot carry a path")]
    UnsupportedBaseUrl(String),

    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}

impl RequestError {
    /// HTTP status carried by the error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status } => Some(*status),
            _ => None,
        }
    }
}
