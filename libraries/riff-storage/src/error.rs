/// Storage-specific errors
use riff_core::PlaylistId;
use thiserror::Error;

/// Result type alias using `StorageError`
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Result type alias using `LibraryError`
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Persistence backend errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Key contains characters the backend cannot store
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Serialization/deserialization error
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A writer panicked while holding the library lock
    #[error("Library state lock poisoned")]
    Poisoned,
}

/// Library store operation errors
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Playlist name is empty once trimmed
    #[error("Playlist name cannot be empty")]
    EmptyPlaylistName,

    /// Playlist does not exist
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Storage failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<LibraryError> for riff_core::RiffError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::EmptyPlaylistName => riff_core::RiffError::invalid_input(err.to_string()),
            LibraryError::PlaylistNotFound(id) => riff_core::RiffError::not_found("Playlist", id.as_str()),
            LibraryError::Storage(StorageError::Io(e)) => riff_core::RiffError::Io(e),
            LibraryError::Storage(StorageError::Serialization(e)) => riff_core::RiffError::Serialization(e),
            LibraryError::Storage(other) => riff_core::RiffError::invalid_input(other.to_string()),
        }
    }
}
