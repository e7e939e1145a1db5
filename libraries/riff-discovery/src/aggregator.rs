//! Search aggregator
//!
//! Local search is a synchronous filter over the catalog. Remote search is
//! debounced and ordered by a monotonically increasing sequence number: a
//! response is applied only if no newer query was issued since, so a slow
//! response can never overwrite newer results.

use crate::error::{Result, SearchError};
use riff_core::{CatalogIndex, GenreCount, RemoteSearchProvider, Track};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, warn};

/// Search settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before a remote query is sent (default: 500)
    pub debounce_ms: u64,

    /// Result cap passed to the remote index (default: 20)
    pub max_results: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            max_results: 20,
        }
    }
}

/// What happened to a remote query
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Results were applied and are now current
    Applied(Vec<Track>),

    /// A newer query was issued; this one's result was dropped
    Superseded,
}

/// Combines catalog search with a remote index
pub struct SearchAggregator {
    catalog: Arc<CatalogIndex>,
    provider: Option<Arc<dyn RemoteSearchProvider>>,
    config: SearchConfig,
    seq: AtomicU64,
    results: RwLock<Vec<Track>>,
}

impl SearchAggregator {
    /// Create an aggregator; without a provider only local search works
    pub fn new(
        catalog: Arc<CatalogIndex>,
        provider: Option<Arc<dyn RemoteSearchProvider>>,
        config: SearchConfig,
    ) -> Self {
        Self {
            catalog,
            provider,
            config,
            seq: AtomicU64::new(0),
            results: RwLock::new(Vec::new()),
        }
    }

    /// Catalog tracks matching `query` on title, artist, album or genre
    /// (case-insensitive). Empty queries return nothing.
    pub fn local_search(&self, query: &str) -> Vec<Track> {
        self.catalog.filter(query)
    }

    /// Catalog tracks of one genre (not debounced)
    pub fn browse_genre(&self, genre: &str) -> Vec<Track> {
        self.catalog.by_genre(genre)
    }

    /// Distinct catalog genres with track counts
    pub fn genres(&self) -> Vec<GenreCount> {
        self.catalog.genres()
    }

    /// Debounced remote query
    ///
    /// A blank query clears the results without touching the network. A
    /// failure clears the results and is returned to the caller.
    pub async fn remote_search(&self, query: &str) -> Result<SearchOutcome> {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let query = query.trim();

        if query.is_empty() {
            self.set_results(Vec::new());
            return Ok(SearchOutcome::Applied(Vec::new()));
        }

        tokio::time::sleep(Duration::from_millis(self.config.debounce_ms)).await;
        if !self.is_latest(seq) {
            debug!(seq, query, "Query superseded during debounce");
            return Ok(SearchOutcome::Superseded);
        }

        let Some(provider) = &self.provider else {
            self.set_results(Vec::new());
            return Err(SearchError::Unavailable);
        };

        let response = provider.search(query, self.config.max_results).await;
        if !self.is_latest(seq) {
            debug!(seq, query, "Discarding stale search response");
            return Ok(SearchOutcome::Superseded);
        }

        match response {
            Ok(tracks) => {
                debug!(seq, query, count = tracks.len(), "Remote search applied");
                self.set_results(tracks.clone());
                Ok(SearchOutcome::Applied(tracks))
            }
            Err(e) => {
                warn!(query, error = %e, "Remote search failed");
                self.set_results(Vec::new());
                Err(SearchError::Remote(e))
            }
        }
    }

    /// Invalidate any in-flight remote query
    pub fn cancel(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
    }

    /// Results of the last applied remote query
    pub fn results(&self) -> Vec<Track> {
        self.results
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == seq
    }

    fn set_results(&self, tracks: Vec<Track>) {
        *self.results.write().unwrap_or_else(PoisonError::into_inner) = tracks;
    }
}

impl std::fmt::Debug for SearchAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchAggregator")
            .field("catalog_len", &self.catalog.len())
            .field("has_provider", &self.provider.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
