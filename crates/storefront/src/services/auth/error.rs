//! Authentication API error types.

use thiserror::Error;

/// Errors that can occur when calling the authentication API.
///
/// The header collapses all of these into one fixed message per operation;
/// the detail only reaches the logs.
#[derive(Debug, Error)]
pub enum AuthApiError {
    /// Transport failure (connection refused, reset, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The success body did not contain a user record.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An endpoint URL could not be built from the configured base URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl AuthApiError {
    /// HTTP status returned by the API, if it answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
