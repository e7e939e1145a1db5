//! Stream extraction for provider identifiers.

use crate::client::RiffServerClient;
use crate::error::{Result, ServerClientError};
use crate::types::{ExtractRequest, ExtractResponse};
use riff_core::{ExtractedStream, StreamKind};
use tracing::debug;

/// Stream extraction client.
pub struct StreamClient<'a> {
    client: &'a RiffServerClient,
}

impl<'a> StreamClient<'a> {
    pub(crate) fn new(client: &'a RiffServerClient) -> Self {
        Self { client }
    }

    /// Ask the backend for a playable stream for a provider identifier.
    ///
    /// A `type` of `"embed"` in the response marks the URL as an embeddable
    /// player page rather than a raw stream.
    pub async fn extract(&self, identifier: &str) -> Result<ExtractedStream> {
        let response: ExtractResponse = self
            .client
            .post_json("/api/stream/extract", &ExtractRequest { identifier }, "extract")
            .await?;

        let url = response
            .stream_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ServerClientError::ParseError("response has no stream URL".into()))?;

        let kind = match response.kind.as_deref() {
            Some(kind) if kind.eq_ignore_ascii_case("embed") => StreamKind::Embed,
            _ => StreamKind::Direct,
        };

        debug!(identifier, kind = ?kind, "Extracted stream");
        Ok(ExtractedStream { url, kind })
    }
}
