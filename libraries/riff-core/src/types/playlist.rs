/// Playlist domain type
use crate::types::{PlaylistId, Track, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name (non-empty once trimmed)
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Explicit cover art, if any
    #[serde(default)]
    pub cover_url: Option<String>,

    /// Ordered tracks
    #[serde(default)]
    pub tracks: Vec<Track>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new empty playlist.
    ///
    /// Name validation is the caller's job; the library store rejects blank
    /// names before building a playlist.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            description: description.into(),
            cover_url: None,
            tracks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the playlist holds a track with this id
    pub fn contains(&self, track_id: &TrackId) -> bool {
        self.tracks.iter().any(|t| &t.id == track_id)
    }

    /// Append a track. Returns false (and changes nothing) if already present.
    pub fn add_track(&mut self, track: Track) -> bool {
        if self.contains(&track.id) {
            return false;
        }
        self.tracks.push(track);
        self.touch();
        true
    }

    /// Remove a track by id. Returns false if it was not present.
    pub fn remove_track(&mut self, track_id: &TrackId) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|t| &t.id != track_id);
        if self.tracks.len() == before {
            return false;
        }
        self.touch();
        true
    }

    /// Cover to display: the explicit cover or the first track's art
    pub fn display_cover(&self) -> Option<&str> {
        self.cover_url.as_deref().or_else(|| {
            self.tracks
                .first()
                .map(|t| t.cover_url.as_str())
                .filter(|url| !url.is_empty())
        })
    }

    /// Total duration of all tracks in seconds
    pub fn total_duration(&self) -> u64 {
        self.tracks.iter().map(|t| u64::from(t.duration)).sum()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
