//! Main Riff backend client.

use crate::error::{Result, ServerClientError};
use crate::search::SearchClient;
use crate::stream::StreamClient;
use crate::types::ServerConfig;
use async_trait::async_trait;
use reqwest::{Client, Response};
use riff_core::{ExtractedStream, RemoteError, RemoteSearchProvider, StreamExtractor, Track};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Client for the stream-extraction and remote search backend.
///
/// # Example
///
/// ```ignore
/// use riff_server_client::{RiffServerClient, ServerConfig};
///
/// let client = RiffServerClient::new(ServerConfig::new("https://api.example.com"))?;
///
/// let stream = client.stream().extract("dQw4w9WgXcQ").await?;
/// let tracks = client.search().search("lofi beats", 20).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RiffServerClient {
    http: Client,
    config: ServerConfig,
}

impl RiffServerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        // Validate URL
        if config.url.trim().is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim().trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&url).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Riff/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: ServerConfig {
                url,
                api_key: config.api_key,
            },
        })
    }

    /// Get the normalized server URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Stream extraction operations.
    pub fn stream(&self) -> StreamClient<'_> {
        StreamClient::new(self)
    }

    /// Remote search operations.
    pub fn search(&self) -> SearchClient<'_> {
        SearchClient::new(self)
    }

    /// POST a JSON body and decode a JSON response.
    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B, what: &str) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.url, path);
        debug!(url = %url, "POST {}", what);

        let mut request = self.http.post(&url).json(body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ServerClientError::ServerUnreachable(e.to_string())
            } else {
                ServerClientError::Request(e)
            }
        })?;

        Self::read_json(response, what).await
    }

    async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| {
                ServerClientError::ParseError(format!("Failed to parse {} response: {}", what, e))
            })
        } else if status.as_u16() == 401 {
            Err(ServerClientError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ServerClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

#[async_trait]
impl StreamExtractor for RiffServerClient {
    async fn extract(&self, identifier: &str) -> std::result::Result<ExtractedStream, RemoteError> {
        Ok(self.stream().extract(identifier).await?)
    }
}

#[async_trait]
impl RemoteSearchProvider for RiffServerClient {
    async fn search(&self, query: &str, max_results: u32) -> std::result::Result<Vec<Track>, RemoteError> {
        Ok(SearchClient::new(self).search(query, max_results).await?)
    }
}
