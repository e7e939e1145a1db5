//! Error types for playback management

use riff_core::TrackId;
use thiserror::Error;

/// Malformed track reference. Fatal for that play attempt: no tier can help.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionError {
    /// Track has an empty identifier
    #[error("Track has an empty id")]
    EmptyTrackId,

    /// Track has no source reference at all
    #[error("Track {0} has an empty source reference")]
    EmptySourceRef(TrackId),

    /// Source reference has a provider URL shape but no video identifier
    #[error("No provider identifier in source reference: {0}")]
    MissingIdentifier(String),
}

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Audio source resolution failed for the requested track
    #[error("Could not resolve audio source: {0}")]
    Resolution(#[from] ResolutionError),

    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Playback surface rejected a command
    #[error("Playback surface error: {0}")]
    Surface(String),

    /// A previous holder of the state lock panicked
    #[error("Playback state lock poisoned")]
    StatePoisoned,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
