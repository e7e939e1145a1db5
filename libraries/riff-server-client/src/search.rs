//! Remote search and conversion of remote results to tracks.

use crate::client::RiffServerClient;
use crate::error::Result;
use crate::types::{RemoteDuration, RemoteTrack, SearchRequest, SearchResponse};
use riff_core::{parse_duration, Track};
use tracing::debug;

/// Watch page prefix used as the `sourceRef` of remote tracks
pub const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// Album given to remote tracks without one
pub const DEFAULT_ALBUM: &str = "YouTube";

/// Genre given to remote tracks without one
pub const DEFAULT_GENRE: &str = "Unknown";

/// Query used for the trending listing
pub const TRENDING_QUERY: &str = "trending music";

/// Display limit for titles, in characters
pub const MAX_TITLE_CHARS: usize = 100;

/// Display limit for artist names, in characters
pub const MAX_ARTIST_CHARS: usize = 50;

/// Remote search client.
pub struct SearchClient<'a> {
    client: &'a RiffServerClient,
}

impl<'a> SearchClient<'a> {
    pub(crate) fn new(client: &'a RiffServerClient) -> Self {
        Self { client }
    }

    /// Search the remote index.
    ///
    /// # Arguments
    /// * `query` - Free-text query
    /// * `max_results` - Upper bound on returned tracks
    pub async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Track>> {
        let response: SearchResponse = self
            .client
            .post_json("/api/search", &SearchRequest { query, max_results }, "search")
            .await?;

        let tracks: Vec<Track> = response
            .tracks
            .into_iter()
            .take(max_results as usize)
            .map(RemoteTrack::into_track)
            .collect();

        debug!(query, count = tracks.len(), "Remote search returned");
        Ok(tracks)
    }

    /// Currently trending tracks.
    pub async fn trending(&self, max_results: u32) -> Result<Vec<Track>> {
        self.search(TRENDING_QUERY, max_results).await
    }

    /// Remote tracks for a genre.
    pub async fn by_genre(&self, genre: &str, max_results: u32) -> Result<Vec<Track>> {
        self.search(&format!("{} music", genre.trim()), max_results)
            .await
    }
}

impl RemoteTrack {
    /// Convert to a catalog track.
    ///
    /// Artist and title come from [`split_title`] unless the index gave a
    /// separate artist.
    pub fn into_track(self) -> Track {
        let (artist, title) = match self.artist.as_deref().map(str::trim) {
            Some(artist) if !artist.is_empty() => (artist.to_string(), self.title.trim().to_string()),
            _ => split_title(&self.title, &self.channel),
        };

        let duration = match &self.duration {
            Some(RemoteDuration::Seconds(secs)) => *secs,
            Some(RemoteDuration::Token(token)) => parse_duration(token),
            None => 0,
        };

        let mut track = Track::new(
            self.id.as_str(),
            truncate_chars(&title, MAX_TITLE_CHARS),
            format!("{}{}", WATCH_URL_BASE, self.id),
        );
        track.artist = truncate_chars(&artist, MAX_ARTIST_CHARS);
        track.album = non_empty_or(self.album, DEFAULT_ALBUM);
        track.genre = non_empty_or(self.genre, DEFAULT_GENRE);
        track.duration = duration;
        track.cover_url = self.cover_url;
        track.year = self.year;
        track
    }
}

/// Split a raw `"Artist - Title"` string.
///
/// Splits on the first `" - "`; without one the channel is the artist and the
/// raw title is kept verbatim.
///
/// ```rust
/// use riff_server_client::split_title;
///
/// assert_eq!(
///     split_title("Daft Punk - One More Time - Live", "DaftPunkVEVO"),
///     ("Daft Punk".to_string(), "One More Time - Live".to_string())
/// );
/// assert_eq!(
///     split_title("Lofi beats to study to", "Lofi Girl"),
///     ("Lofi Girl".to_string(), "Lofi beats to study to".to_string())
/// );
/// ```
pub fn split_title(raw: &str, channel: &str) -> (String, String) {
    match raw.split_once(" - ") {
        Some((artist, title)) => (artist.trim().to_string(), title.trim().to_string()),
        None => (channel.to_string(), raw.to_string()),
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
