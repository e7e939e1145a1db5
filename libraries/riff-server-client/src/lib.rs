//! Riff Server Client
//!
//! HTTP client for the backend endpoints Riff depends on.
//!
//! # Features
//!
//! - **Stream extraction**: provider identifier to playable stream URL
//! - **Remote search**: free-text, trending and per-genre listings
//! - **Result normalization**: "Artist - Title" splitting, display limits,
//!   duration tokens and defaults for missing metadata
//!
//! [`RiffServerClient`] implements `riff_core::StreamExtractor` and
//! `riff_core::RemoteSearchProvider`, so it plugs straight into the audio
//! resolver and the search aggregator.
//!
//! # Example
//!
//! ```ignore
//! use riff_server_client::{RiffServerClient, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RiffServerClient::new(ServerConfig::new("https://api.example.com"))?;
//!
//!     for track in client.search().trending(10).await? {
//!         println!("{} - {}", track.artist, track.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod search;
mod stream;
mod types;

pub use client::RiffServerClient;
pub use error::{Result, ServerClientError};
pub use search::{
    split_title, SearchClient, DEFAULT_ALBUM, DEFAULT_GENRE, MAX_ARTIST_CHARS, MAX_TITLE_CHARS,
    TRENDING_QUERY, WATCH_URL_BASE,
};
pub use stream::StreamClient;
pub use types::{RemoteDuration, RemoteTrack, ServerConfig};
