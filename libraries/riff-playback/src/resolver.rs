//! Audio source resolution
//!
//! Turns a track's `sourceRef` into something a playback surface can render.
//! References that are not provider URLs are returned unchanged. Provider URLs
//! go through a fallback chain where every tier boundary is an explicit
//! `Result` branch:
//!
//! 1. **Extraction**: ask the stream-extraction backend (bounded by a timeout)
//! 2. **Embed**: build an embeddable player URL for the identifier
//! 3. **Watch**: canonical watch-page URL, flagged with a warning
//!
//! Only malformed input is an error; every expected failure degrades to the
//! next tier.

use crate::error::ResolutionError;
use crate::types::{ResolutionTier, ResolvedSource, SourceMode, TierFailure};
use once_cell::sync::Lazy;
use regex::Regex;
use riff_core::{RemoteError, StreamExtractor, StreamKind, Track};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Known provider URL shapes: watch pages (any subdomain, extra query
/// params), short links, embed and shorts paths. The provider must be the
/// host of the URL, not a segment of some other host's path.
static PROVIDER_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:https?://)?(?:[a-z0-9-]+\.)*(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/|v/)|youtu\.be/)([^&?#/\s]*)",
    )
    .expect("static provider URL pattern")
});

static SAFE_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+$").expect("static identifier pattern")
});

/// Resolver settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Upper bound for the extraction call, in milliseconds (default: 5000)
    pub tier_timeout_ms: u64,

    /// Whether the embed tier may be used (default: true)
    pub embed_fallback: bool,

    /// Prefix the identifier is appended to for watch URLs
    pub watch_url_base: String,

    /// Prefix the identifier is appended to for embed URLs
    pub embed_url_base: String,

    /// Query string appended to embed URLs
    pub embed_params: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            tier_timeout_ms: 5000,
            embed_fallback: true,
            watch_url_base: "https://www.youtube.com/watch?v=".to_string(),
            embed_url_base: "https://www.youtube.com/embed/".to_string(),
            embed_params: "autoplay=1&controls=0&enablejsapi=1".to_string(),
        }
    }
}

impl ResolverConfig {
    /// Timeout applied to the extraction tier
    pub fn tier_timeout(&self) -> Duration {
        Duration::from_millis(self.tier_timeout_ms)
    }

    /// Canonical watch URL for an identifier
    pub fn watch_url(&self, identifier: &str) -> String {
        format!("{}{}", self.watch_url_base, identifier)
    }

    /// Embeddable player URL for an identifier
    pub fn embed_url(&self, identifier: &str) -> String {
        if self.embed_params.is_empty() {
            format!("{}{}", self.embed_url_base, identifier)
        } else {
            format!("{}{}?{}", self.embed_url_base, identifier, self.embed_params)
        }
    }
}

/// Extract the provider identifier from a source reference
///
/// Returns `Ok(None)` when the reference is not a provider URL (a direct
/// asset), and an error when it has a provider URL shape but no identifier.
pub fn extract_identifier(source_ref: &str) -> Result<Option<String>, ResolutionError> {
    let Some(captures) = PROVIDER_URL.captures(source_ref) else {
        return Ok(None);
    };

    match captures.get(1).map(|m| m.as_str()) {
        Some(id) if !id.is_empty() => Ok(Some(id.to_string())),
        _ => Err(ResolutionError::MissingIdentifier(source_ref.to_string())),
    }
}

/// Tiered audio source resolver
#[derive(Clone)]
pub struct AudioResolver {
    extractor: Option<Arc<dyn StreamExtractor>>,
    config: ResolverConfig,
}

impl AudioResolver {
    /// Create a resolver backed by a stream-extraction endpoint
    pub fn new(extractor: Arc<dyn StreamExtractor>, config: ResolverConfig) -> Self {
        Self {
            extractor: Some(extractor),
            config,
        }
    }

    /// Create a resolver with no extraction endpoint (starts at the embed tier)
    pub fn without_extractor(config: ResolverConfig) -> Self {
        Self {
            extractor: None,
            config,
        }
    }

    /// Resolver configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a track to a playable source
    pub async fn resolve(&self, track: &Track) -> Result<ResolvedSource, ResolutionError> {
        if track.id.is_blank() {
            return Err(ResolutionError::EmptyTrackId);
        }
        let source_ref = track.source_ref.trim();
        if source_ref.is_empty() {
            return Err(ResolutionError::EmptySourceRef(track.id.clone()));
        }

        let Some(identifier) = extract_identifier(source_ref)? else {
            debug!(track_id = %track.id, "Source reference is a direct asset");
            return Ok(ResolvedSource::direct(source_ref));
        };

        let mut degraded = Vec::new();

        match self.extract(&identifier).await {
            Ok(stream) => {
                let mode = match stream.kind {
                    StreamKind::Direct => SourceMode::Direct,
                    StreamKind::Embed => SourceMode::Embed,
                };
                debug!(track_id = %track.id, identifier = %identifier, mode = ?mode, "Stream extracted");
                return Ok(ResolvedSource {
                    url: stream.url,
                    mode,
                    identifier: Some(identifier),
                    degraded,
                    warning: None,
                });
            }
            Err(reason) => {
                debug!(track_id = %track.id, tier = ?ResolutionTier::Extraction, reason = %reason, "Resolution tier failed");
                degraded.push(TierFailure {
                    tier: ResolutionTier::Extraction,
                    reason,
                });
            }
        }

        match self.embed(&identifier) {
            Ok(url) => {
                return Ok(ResolvedSource {
                    url,
                    mode: SourceMode::Embed,
                    identifier: Some(identifier),
                    degraded,
                    warning: None,
                });
            }
            Err(reason) => {
                debug!(track_id = %track.id, tier = ?ResolutionTier::Embed, reason = %reason, "Resolution tier failed");
                degraded.push(TierFailure {
                    tier: ResolutionTier::Embed,
                    reason,
                });
            }
        }

        warn!(track_id = %track.id, identifier = %identifier, "Falling back to watch URL");
        Ok(ResolvedSource {
            url: self.config.watch_url(&identifier),
            mode: SourceMode::Raw,
            identifier: Some(identifier),
            degraded,
            warning: Some(format!(
                "No playable stream found for \"{}\"; it may not play",
                track.title
            )),
        })
    }

    async fn extract(&self, identifier: &str) -> Result<riff_core::ExtractedStream, String> {
        let Some(extractor) = &self.extractor else {
            return Err("no extraction endpoint configured".to_string());
        };

        let timeout = self.config.tier_timeout();
        let stream = match tokio::time::timeout(timeout, extractor.extract(identifier)).await {
            Ok(result) => result.map_err(|e| e.to_string())?,
            Err(_) => return Err(RemoteError::Timeout(timeout).to_string()),
        };

        if stream.url.trim().is_empty() {
            return Err("extraction returned an empty stream URL".to_string());
        }
        Ok(stream)
    }

    fn embed(&self, identifier: &str) -> Result<String, String> {
        if !self.config.embed_fallback {
            return Err("embed fallback disabled".to_string());
        }
        if !SAFE_IDENTIFIER.is_match(identifier) {
            return Err(format!("identifier {identifier:?} cannot be embedded"));
        }
        Ok(self.config.embed_url(identifier))
    }
}

impl std::fmt::Debug for AudioResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioResolver")
            .field("has_extractor", &self.extractor.is_some())
            .field("config", &self.config)
            .finish()
    }
}
