/// Collaborator traits for Riff
///
/// The engine talks to the outside world (stream extraction backend, remote
/// search index, play history sink) only through these seams.
use crate::error::RemoteError;
use crate::types::Track;
use async_trait::async_trait;

/// How an extracted stream must be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// Raw audio stream, playable by a native audio element
    Direct,

    /// Embeddable player page, needs the hidden widget surface
    Embed,
}

/// Successful answer from a stream-extraction backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedStream {
    /// Playable location
    pub url: String,

    /// Rendering kind reported by the backend
    pub kind: StreamKind,
}

/// Stream-extraction backend
///
/// Implementers turn a provider video identifier into a playable URL.
#[async_trait]
pub trait StreamExtractor: Send + Sync {
    /// Extract a stream for the provider identifier
    async fn extract(&self, identifier: &str) -> Result<ExtractedStream, RemoteError>;
}

/// Remote search index, treated as a black-box query interface
#[async_trait]
pub trait RemoteSearchProvider: Send + Sync {
    /// Query the remote index for up to `max_results` tracks
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Track>, RemoteError>;
}

/// Sink notified after every successful play request
pub trait PlayHistory: Send + Sync {
    /// Record that the track started playing
    fn record_play(&self, track: &Track);
}
