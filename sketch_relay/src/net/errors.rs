//! Game authority API error types.

use thiserror::Error;

/// Errors that can occur while talking to the game authority
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ApiError {
    /// Transport failure or timeout
    #[error("Network error: {0}")]
    Network(String),

    /// The authority answered with a non-success status
    #[error("Request refused with status {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be understood
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Whether retrying the same request later might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Http { status, .. } => *status >= 500,
            Self::Malformed(_) => false,
        }
    }
}

/// Result type for game authority API operations
pub type ApiResult<T> = Result<T, ApiError>;
