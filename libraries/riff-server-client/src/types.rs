//! Types for the extraction and search API requests and responses.

use serde::{Deserialize, Serialize};

/// Configuration for connecting to the backend.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "https://api.example.com")
    pub url: String,
    /// API key sent as a bearer token, if the backend requires one
    pub api_key: Option<String>,
}

impl ServerConfig {
    /// Create a new server config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
        }
    }

    /// Create a config with an API key.
    pub fn with_api_key(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: Some(api_key.into()),
        }
    }
}

// =============================================================================
// Stream Extraction Types
// =============================================================================

/// Request body for the extraction endpoint.
#[derive(Debug, Serialize)]
pub struct ExtractRequest<'a> {
    pub identifier: &'a str,
}

/// Response from the extraction endpoint.
///
/// Older deployments answer with `audioUrl` instead of `streamUrl`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    #[serde(alias = "audioUrl")]
    pub stream_url: Option<String>,
    /// `"direct"` (default) or `"embed"`
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

// =============================================================================
// Search Types
// =============================================================================

/// Request body for the search endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub max_results: u32,
}

/// Response from the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Vec<RemoteTrack>,
}

/// Track as returned by the remote index.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTrack {
    /// Provider video identifier
    pub id: String,
    /// Raw title, often "Artist - Title"
    pub title: String,
    /// Separate artist, when the index provides one
    #[serde(default)]
    pub artist: Option<String>,
    /// Uploader name
    #[serde(default, alias = "channelTitle")]
    pub channel: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    /// `PT#H#M#S` token or plain seconds
    #[serde(default)]
    pub duration: Option<RemoteDuration>,
    #[serde(default, alias = "thumbnail")]
    pub cover_url: String,
    #[serde(default)]
    pub year: Option<i32>,
}

/// Duration as sent by the index
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RemoteDuration {
    Seconds(u32),
    Token(String),
}
