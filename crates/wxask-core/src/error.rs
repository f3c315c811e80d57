//! Error types for wxask

use thiserror::Error;

/// Number of response-body characters kept in HTTP diagnostics.
pub const BODY_PREVIEW_CHARS: usize = 500;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring clients or talking to a provider.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl Error {
    /// Build an HTTP error, keeping only the first characters of the body.
    pub fn http(status: u16, body: &str) -> Self {
        Error::Http {
            status,
            body: truncate_body(body),
        }
    }

    /// Status code carried by an HTTP error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// First [`BODY_PREVIEW_CHARS`] characters of a response body.
pub fn truncate_body(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
