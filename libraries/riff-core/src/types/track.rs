/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// Audio track
///
/// Shared read-only across the engine. Corrections (such as the real
/// duration reported by a playback surface) produce a new value through
/// [`Track::with_duration`] rather than mutating a shared instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist: String,

    /// Album name
    #[serde(default)]
    pub album: String,

    /// Duration in seconds (may be an estimate until playback reports it)
    #[serde(default)]
    pub duration: u32,

    /// Cover art location
    #[serde(default)]
    pub cover_url: String,

    /// Opaque reference resolvable to a stream: a direct asset locator or a
    /// provider watch-page URL
    #[serde(alias = "audioUrl")]
    pub source_ref: String,

    /// Genre
    #[serde(default)]
    pub genre: String,

    /// Release year
    #[serde(default)]
    pub year: Option<i32>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        source_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: String::new(),
            album: String::new(),
            duration: 0,
            cover_url: String::new(),
            source_ref: source_ref.into(),
            genre: String::new(),
            year: None,
        }
    }

    /// Copy of this track with a corrected duration
    #[must_use]
    pub fn with_duration(&self, seconds: f64) -> Self {
        let duration = if seconds.is_finite() && seconds > 0.0 {
            seconds.round().min(f64::from(u32::MAX)) as u32
        } else {
            0
        };
        Self {
            duration,
            ..self.clone()
        }
    }

    /// Case-insensitive substring match over title, artist, album and genre.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        [&self.title, &self.artist, &self.album, &self.genre]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}
