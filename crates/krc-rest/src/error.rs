//! Error types for REST ledger operations.

use krc_transaction::LedgerError;

/// Errors that can occur when talking to the REST API.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP request failed before a response was read.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// Failed to serialize or deserialize data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The response parsed but carried unusable values.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The ledger refused the submitted transaction.
    #[error("transaction rejected: {0}")]
    Rejected(String),

    /// No usable tokio runtime for a blocking call.
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl From<RestError> for LedgerError {
    fn from(e: RestError) -> Self {
        match e {
            RestError::HttpError(e) if e.is_timeout() => LedgerError::Timeout,
            RestError::HttpError(e) => LedgerError::Transport(e.to_string()),
            RestError::Status { status, body } => LedgerError::Http { status, body },
            RestError::SerializationError(e) => LedgerError::InvalidResponse(e.to_string()),
            RestError::InvalidResponse(msg) => LedgerError::InvalidResponse(msg),
            RestError::Rejected(msg) => LedgerError::Rejected(msg),
            RestError::Runtime(msg) => LedgerError::Transport(msg),
        }
    }
}
