//! Playback queue built from the list a track was picked from

use riff_core::{Track, TrackId};

/// Ordered list of tracks being navigated, plus the current position
///
/// Built from the "context" the user picked a track from (search results,
/// a playlist, a genre listing). The current track is always present in the
/// queue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Queue {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl Queue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue for `track` picked from `context`
    ///
    /// - Empty context: the queue is just `[track]`
    /// - Track not in context: it is prepended so the current track is
    ///   always part of the queue
    /// - Otherwise the context is used as-is and the index points at the
    ///   first occurrence of the track's id
    pub fn from_context(context: Vec<Track>, track: &Track) -> Self {
        let mut tracks = context;
        let index = match tracks.iter().position(|t| t.id == track.id) {
            Some(index) => index,
            None => {
                tracks.insert(0, track.clone());
                0
            }
        };

        Self {
            tracks,
            current: Some(index),
        }
    }

    /// Position of a track id in the queue
    pub fn index_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Current index
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Current track
    pub fn current(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Move the cursor; out-of-range indices are ignored
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Replace the track at `index` (used for metadata corrections)
    pub fn replace(&mut self, index: usize, track: Track) {
        if let Some(slot) = self.tracks.get_mut(index) {
            *slot = track;
        }
    }

    /// All tracks in order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Drop all tracks
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
    }
}
