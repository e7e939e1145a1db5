//! Riff Core
//!
//! Platform-agnostic core types, catalog lookup and collaborator traits for Riff.
//!
//! This crate provides the foundational building blocks shared by the playback
//! engine, the library store and the search aggregator.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `UserData`, `RepeatMode`
//! - **Catalog Index**: in-memory track metadata with lookup and text/genre filters
//! - **Collaborator Traits**: `StreamExtractor`, `RemoteSearchProvider`, `PlayHistory`
//! - **Error Handling**: `RiffError` and the transport-agnostic `RemoteError`
//!
//! # Example
//!
//! ```rust
//! use riff_core::{CatalogIndex, Track};
//!
//! let catalog = CatalogIndex::new(vec![
//!     Track::new("t1", "Midnight Drive", "https://cdn.example.com/t1.mp3"),
//! ]);
//!
//! assert_eq!(catalog.filter("midnight").len(), 1);
//! assert!(catalog.filter("").is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod duration;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use catalog::{CatalogIndex, GenreCount};
pub use duration::{format_duration, parse_duration};
pub use error::{RemoteError, Result, RiffError};
pub use traits::{ExtractedStream, PlayHistory, RemoteSearchProvider, StreamExtractor, StreamKind};

pub use types::{
    Playlist, PlaylistId, RecentlyPlayed, RepeatMode, Track, TrackId, UserData,
    RECENTLY_PLAYED_CAPACITY,
};
