//! Riff Storage
//!
//! Persistent library data for Riff: liked tracks, playlists and the
//! recently played list.
//!
//! # Architecture
//!
//! - **Single Writer**: [`LibraryStore`] is the only thing that mutates `UserData`
//! - **Whole-Record Writes**: every mutation rewrites one serialized record
//! - **Forgiving Loads**: missing or corrupt data starts an empty library
//! - **Pluggable Backends**: anything implementing [`KeyValueStore`]
//!
//! # Example
//!
//! ```rust
//! use riff_core::Track;
//! use riff_storage::LibraryStore;
//!
//! let store = LibraryStore::in_memory();
//! let track = Track::new("t1", "Midnight Drive", "https://cdn.example.com/t1.mp3");
//!
//! store.like_track(track.clone()).unwrap();
//! store.like_track(track.clone()).unwrap();
//! assert_eq!(store.liked_tracks().unwrap().len(), 1);
//!
//! let playlist = store.create_playlist("Late Night", "").unwrap();
//! store.add_track_to_playlist(&playlist.id, track).unwrap();
//! ```

mod error;
mod kv;
mod library;

pub use error::{LibraryError, Result, StorageError, StorageResult};
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use library::{LibraryStore, USER_DATA_KEY};
