/// Per-user library data persisted across sessions
use crate::types::{Playlist, PlaylistId, RecentlyPlayed, Track, TrackId};
use serde::{Deserialize, Serialize};

/// Liked tracks, playlists and recently played tracks.
///
/// Serialized as one record `{likedTracks, playlists, recentlyPlayed}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    /// Liked tracks, unique by id, in the order they were liked
    #[serde(default)]
    pub liked_tracks: Vec<Track>,

    /// Playlists in creation order
    #[serde(default)]
    pub playlists: Vec<Playlist>,

    /// Most-recent-first, capped, deduplicated
    #[serde(default)]
    pub recently_played: RecentlyPlayed,
}

impl UserData {
    /// Whether the track id is liked
    pub fn is_liked(&self, track_id: &TrackId) -> bool {
        self.liked_tracks.iter().any(|t| &t.id == track_id)
    }

    /// Like a track. Returns false when it was already liked.
    pub fn like(&mut self, track: Track) -> bool {
        if self.is_liked(&track.id) {
            return false;
        }
        self.liked_tracks.push(track);
        true
    }

    /// Unlike a track. Returns false when it was not liked.
    pub fn unlike(&mut self, track_id: &TrackId) -> bool {
        let before = self.liked_tracks.len();
        self.liked_tracks.retain(|t| &t.id != track_id);
        self.liked_tracks.len() != before
    }

    /// Look up a playlist
    pub fn playlist(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| &p.id == id)
    }

    /// Look up a playlist for mutation
    pub fn playlist_mut(&mut self, id: &PlaylistId) -> Option<&mut Playlist> {
        self.playlists.iter_mut().find(|p| &p.id == id)
    }

    /// Repair invariants that stored data from older sessions may violate:
    /// duplicate likes and an oversized recently played list.
    pub fn normalize(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.liked_tracks.retain(|t| seen.insert(t.id.clone()));
        self.recently_played.normalize();
    }
}
