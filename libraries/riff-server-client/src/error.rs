//! Error types for the Riff server client.

use riff_core::RemoteError;
use thiserror::Error;

/// Errors that can occur when talking to the extraction/search backend.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// API key missing or rejected
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;

impl From<ServerClientError> for RemoteError {
    fn from(err: ServerClientError) -> Self {
        match err {
            ServerClientError::ServerError { status, message } => Self::Status { status, message },
            ServerClientError::AuthRequired => Self::Status {
                status: 401,
                message: "authentication required".to_string(),
            },
            ServerClientError::ParseError(msg) => Self::InvalidResponse(msg),
            ServerClientError::ServerUnreachable(msg) => Self::Unreachable(msg),
            other @ (ServerClientError::Request(_) | ServerClientError::InvalidUrl(_)) => {
                Self::Unreachable(other.to_string())
            }
        }
    }
}
