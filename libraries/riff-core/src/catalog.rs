//! Catalog index
//!
//! In-memory, read-only track metadata for the local catalog. Lookups are by
//! id; listing is by free text (search box) or by genre (browse tiles).

use crate::error::Result;
use crate::types::{Track, TrackId};
use std::collections::HashMap;

const SAMPLE_CATALOG: &str = include_str!("../data/sample_catalog.json");

/// A genre and how many catalog tracks carry it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreCount {
    /// Genre name as it appears in the catalog
    pub name: String,

    /// Number of tracks with this genre
    pub count: usize,
}

/// Static track catalog with id lookup and filters
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    tracks: Vec<Track>,
    by_id: HashMap<TrackId, usize>,
}

impl CatalogIndex {
    /// Build an index. Later tracks reusing an earlier id are dropped so ids
    /// stay unique within the catalog.
    pub fn new(tracks: Vec<Track>) -> Self {
        let mut unique = Vec::with_capacity(tracks.len());
        let mut by_id = HashMap::with_capacity(tracks.len());

        for track in tracks {
            if by_id.contains_key(&track.id) {
                continue;
            }
            by_id.insert(track.id.clone(), unique.len());
            unique.push(track);
        }

        Self {
            tracks: unique,
            by_id,
        }
    }

    /// Parse a JSON array of tracks
    pub fn from_json(json: &str) -> Result<Self> {
        let tracks: Vec<Track> = serde_json::from_str(json)?;
        Ok(Self::new(tracks))
    }

    /// The bundled sample catalog
    pub fn sample() -> Result<Self> {
        Self::from_json(SAMPLE_CATALOG)
    }

    /// Look up a track by id
    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.by_id.get(id).map(|&i| &self.tracks[i])
    }

    /// All tracks in catalog order
    pub fn all(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Case-insensitive substring filter across title, artist, album and genre.
    ///
    /// A blank query yields no results.
    pub fn filter(&self, query: &str) -> Vec<Track> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.tracks
            .iter()
            .filter(|t| t.matches_text(&needle))
            .cloned()
            .collect()
    }

    /// Tracks whose genre equals `genre` (case-insensitive)
    pub fn by_genre(&self, genre: &str) -> Vec<Track> {
        let genre = genre.trim();
        if genre.is_empty() {
            return Vec::new();
        }

        self.tracks
            .iter()
            .filter(|t| t.genre.eq_ignore_ascii_case(genre))
            .cloned()
            .collect()
    }

    /// Distinct genres with track counts, in order of first appearance
    pub fn genres(&self) -> Vec<GenreCount> {
        let mut genres: Vec<GenreCount> = Vec::new();

        for track in &self.tracks {
            if track.genre.is_empty() {
                continue;
            }
            match genres
                .iter_mut()
                .find(|g| g.name.eq_ignore_ascii_case(&track.genre))
            {
                Some(existing) => existing.count += 1,
                None => genres.push(GenreCount {
                    name: track.genre.clone(),
                    count: 1,
                }),
            }
        }

        genres
    }
}
