//! Library store
//!
//! The only writer of [`UserData`]. Every mutation is applied to a copy of
//! the in-memory snapshot, written wholesale to the backend, then swapped in.
//! Readers always see a complete snapshot.

use crate::error::{LibraryError, Result, StorageError};
use crate::kv::{KeyValueStore, MemoryStore};
use riff_core::{PlayHistory, Playlist, PlaylistId, Track, TrackId, UserData};
use std::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, error, info, warn};

/// Key the serialized `UserData` record lives under
pub const USER_DATA_KEY: &str = "riff.user_data";

/// Persistent store for liked tracks, playlists and recently played tracks
pub struct LibraryStore {
    data: RwLock<UserData>,
    backend: Box<dyn KeyValueStore>,
}

impl LibraryStore {
    /// Load the stored record from `backend`
    ///
    /// Never fails: a missing record, unreadable storage or corrupt content
    /// all start from an empty library.
    pub fn load(backend: Box<dyn KeyValueStore>) -> Self {
        let data = match backend.get(USER_DATA_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<UserData>(&json) {
                Ok(mut data) => {
                    data.normalize();
                    info!(
                        liked = data.liked_tracks.len(),
                        playlists = data.playlists.len(),
                        recent = data.recently_played.len(),
                        "Loaded library"
                    );
                    data
                }
                Err(e) => {
                    warn!(error = %e, "Stored library is corrupt, starting empty");
                    UserData::default()
                }
            },
            Ok(None) => {
                info!("No stored library, starting empty");
                UserData::default()
            }
            Err(e) => {
                error!(error = %e, "Failed to read stored library, starting empty");
                UserData::default()
            }
        };

        Self {
            data: RwLock::new(data),
            backend,
        }
    }

    /// Store backed by memory only
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStore::new()))
    }

    // ===== Liked Tracks =====

    /// Like a track; liking twice keeps one entry. Returns whether it changed.
    pub fn like_track(&self, track: Track) -> Result<bool> {
        self.mutate(|data| Ok(data.like(track)))
    }

    /// Unlike a track; unknown tracks are a no-op. Returns whether it changed.
    pub fn unlike_track(&self, track_id: &TrackId) -> Result<bool> {
        self.mutate(|data| Ok(data.unlike(track_id)))
    }

    /// Whether a track is liked
    pub fn is_liked(&self, track_id: &TrackId) -> Result<bool> {
        Ok(self.read()?.is_liked(track_id))
    }

    /// Liked tracks in the order they were liked
    pub fn liked_tracks(&self) -> Result<Vec<Track>> {
        Ok(self.read()?.liked_tracks.clone())
    }

    // ===== Playlists =====

    /// Create a playlist. The name is trimmed and must not be empty.
    pub fn create_playlist(&self, name: &str, description: &str) -> Result<Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::EmptyPlaylistName);
        }

        let playlist = Playlist::new(name, description.trim());
        self.mutate(|data| {
            data.playlists.push(playlist.clone());
            Ok(())
        })?;
        info!(playlist_id = %playlist.id, name = %playlist.name, "Created playlist");
        Ok(playlist)
    }

    /// Append a track to a playlist; already-present tracks are skipped
    pub fn add_track_to_playlist(&self, playlist_id: &PlaylistId, track: Track) -> Result<bool> {
        self.mutate(|data| {
            let playlist = data
                .playlist_mut(playlist_id)
                .ok_or_else(|| LibraryError::PlaylistNotFound(playlist_id.clone()))?;
            Ok(playlist.add_track(track))
        })
    }

    /// Remove a track from a playlist
    pub fn remove_track_from_playlist(&self, playlist_id: &PlaylistId, track_id: &TrackId) -> Result<bool> {
        self.mutate(|data| {
            let playlist = data
                .playlist_mut(playlist_id)
                .ok_or_else(|| LibraryError::PlaylistNotFound(playlist_id.clone()))?;
            Ok(playlist.remove_track(track_id))
        })
    }

    /// Delete a playlist. Returns false when no such playlist exists.
    pub fn delete_playlist(&self, playlist_id: &PlaylistId) -> Result<bool> {
        self.mutate(|data| {
            let before = data.playlists.len();
            data.playlists.retain(|p| &p.id != playlist_id);
            Ok(data.playlists.len() != before)
        })
    }

    /// All playlists in creation order
    pub fn playlists(&self) -> Result<Vec<Playlist>> {
        Ok(self.read()?.playlists.clone())
    }

    /// One playlist
    pub fn playlist(&self, playlist_id: &PlaylistId) -> Result<Option<Playlist>> {
        Ok(self.read()?.playlist(playlist_id).cloned())
    }

    // ===== Recently Played =====

    /// Put a track at the front of recently played (deduplicated, capped)
    pub fn push_recently_played(&self, track: Track) -> Result<()> {
        self.mutate(|data| {
            data.recently_played.push(track);
            Ok(())
        })
    }

    /// Recently played, most recent first
    pub fn recently_played(&self) -> Result<Vec<Track>> {
        Ok(self.read()?.recently_played.to_vec())
    }

    /// Copy of the whole library
    pub fn snapshot(&self) -> Result<UserData> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, UserData>> {
        self.data.read().map_err(|_| StorageError::Poisoned.into())
    }

    // Apply `f` to a copy; commit and persist only if it succeeds and changes
    // something. The write lock is held through persistence so writes are
    // serialized.
    fn mutate<T>(&self, f: impl FnOnce(&mut UserData) -> Result<T>) -> Result<T> {
        let mut guard = self.data.write().map_err(|_| StorageError::Poisoned)?;
        let mut next = guard.clone();
        let out = f(&mut next)?;

        if next != *guard {
            self.persist(&next);
            *guard = next;
        }
        Ok(out)
    }

    fn persist(&self, data: &UserData) {
        let result = serde_json::to_string(data)
            .map_err(StorageError::from)
            .and_then(|json| self.backend.set(USER_DATA_KEY, &json));

        match result {
            Ok(()) => debug!("Library persisted"),
            // In-memory state stays authoritative for this session
            Err(e) => error!(error = %e, "Failed to persist library"),
        }
    }
}

impl PlayHistory for LibraryStore {
    fn record_play(&self, track: &Track) {
        if let Err(e) = self.push_recently_played(track.clone()) {
            error!(track_id = %track.id, error = %e, "Failed to record play");
        }
    }
}

impl std::fmt::Debug for LibraryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryStore").finish_non_exhaustive()
    }
}
