/// Core error types for Riff
use std::time::Duration;
use thiserror::Error;

/// Result type alias using `RiffError`
pub type Result<T> = std::result::Result<T, RiffError>;

/// Core error type for Riff
#[derive(Error, Debug)]
pub enum RiffError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A remote collaborator failed
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl RiffError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Failure reported by a remote collaborator (stream extraction, remote search).
///
/// Kept free of any HTTP client type so the engine crates never depend on a
/// particular transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Endpoint could not be reached (connect failure, DNS, offline)
    #[error("Endpoint unreachable: {0}")]
    Unreachable(String),

    /// Endpoint answered with a non-success status
    #[error("Endpoint error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Endpoint answered but the body could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The call did not complete within its time budget
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}
