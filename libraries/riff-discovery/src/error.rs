use riff_core::RemoteError;
use thiserror::Error;

/// Remote search failures. Transient: shown as a notice, local search keeps working.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The remote index failed to answer
    #[error("Remote search failed: {0}")]
    Remote(#[from] RemoteError),

    /// No remote index is configured for this session
    #[error("Remote search is not available")]
    Unavailable,
}

pub type Result<T> = std::result::Result<T, SearchError>;
