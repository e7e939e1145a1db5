//! Recently played tracks
//!
//! Maintains a bounded, most-recent-first list of played tracks

use crate::types::{Track, TrackId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of recently played entries kept
pub const RECENTLY_PLAYED_CAPACITY: usize = 10;

/// Recently played list with bounded size
///
/// Most recent track sits at the front. Inserting a track that is already
/// present moves it to the front instead of duplicating it, and the oldest
/// entries are discarded beyond [`RECENTLY_PLAYED_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentlyPlayed {
    tracks: VecDeque<Track>,
}

impl RecentlyPlayed {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a play (dedup by id, cap at capacity)
    pub fn push(&mut self, track: Track) {
        self.tracks.retain(|t| t.id != track.id);
        self.tracks.push_front(track);
        self.tracks.truncate(RECENTLY_PLAYED_CAPACITY);
    }

    /// Most recent track (without removing)
    pub fn latest(&self) -> Option<&Track> {
        self.tracks.front()
    }

    /// Iterate most-recent-first
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Whether the track id is present
    pub fn contains(&self, id: &TrackId) -> bool {
        self.tracks.iter().any(|t| &t.id == id)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Snapshot as a vector, most-recent-first
    pub fn to_vec(&self) -> Vec<Track> {
        self.tracks.iter().cloned().collect()
    }

    // Stored data from older sessions may exceed the cap or contain dupes.
    pub(crate) fn normalize(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.tracks.retain(|t| seen.insert(t.id.clone()));
        self.tracks.truncate(RECENTLY_PLAYED_CAPACITY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_track(id: &str) -> Track {
        Track::new(id, format!("Track {id}"), format!("/music/{id}.mp3"))
    }

    #[test]
    fn push_puts_latest_first() {
        let mut recent = RecentlyPlayed::new();
        recent.push(create_test_track("1"));
        recent.push(create_test_track("2"));

        assert_eq!(recent.latest().unwrap().id.as_str(), "2");
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn replay_moves_to_front_without_duplicate() {
        let mut recent = RecentlyPlayed::new();
        recent.push(create_test_track("1"));
        recent.push(create_test_track("2"));
        recent.push(create_test_track("1"));

        let ids: Vec<&str> = recent.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut recent = RecentlyPlayed::new();
        for i in 0..15 {
            recent.push(create_test_track(&i.to_string()));
        }

        assert_eq!(recent.len(), RECENTLY_PLAYED_CAPACITY);
        assert_eq!(recent.latest().unwrap().id.as_str(), "14");
        assert!(!recent.contains(&TrackId::new("4")));
        assert!(recent.contains(&TrackId::new("5")));
    }

    #[test]
    fn normalize_repairs_stored_lists() {
        let json = serde_json::to_string(
            &(0..12)
                .map(|i| create_test_track(&(i % 11).to_string()))
                .collect::<Vec<_>>(),
        )
        .unwrap();
        let mut recent: RecentlyPlayed = serde_json::from_str(&json).unwrap();
        recent.normalize();

        assert_eq!(recent.len(), RECENTLY_PLAYED_CAPACITY);
        assert_eq!(recent.latest().unwrap().id.as_str(), "0");
    }
}
