/// Player application error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Track not found: {0}")]
    TrackNotFound(String),

    #[error("Remote search is not configured (set RIFF_SERVER__URL)")]
    RemoteUnavailable,

    #[error("Catalog error: {0}")]
    Catalog(#[from] riff_core::RiffError),

    #[error("Library error: {0}")]
    Library(#[from] riff_storage::LibraryError),

    #[error("Playback error: {0}")]
    Playback(#[from] riff_playback::PlaybackError),

    #[error("Resolution error: {0}")]
    Resolution(#[from] riff_playback::ResolutionError),

    #[error("Search error: {0}")]
    Search(#[from] riff_discovery::SearchError),

    #[error("Server error: {0}")]
    Server(#[from] riff_server_client::ServerClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
