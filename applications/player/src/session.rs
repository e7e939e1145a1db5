//! Player session
//!
//! Owns every long-lived component of a running player and wires them
//! together once, at [`PlayerSession::init`]. Nothing here is global: a
//! session is created, used and torn down with [`PlayerSession::shutdown`].

use crate::config::PlayerConfig;
use crate::error::{AppError, Result};
use riff_core::{CatalogIndex, PlayHistory, RemoteSearchProvider, StreamExtractor, Track, TrackId};
use riff_discovery::SearchAggregator;
use riff_playback::{AudioResolver, Player};
use riff_server_client::{RiffServerClient, ServerConfig};
use riff_storage::{JsonFileStore, LibraryStore};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Running player session
pub struct PlayerSession {
    config: PlayerConfig,
    catalog: Arc<CatalogIndex>,
    library: Arc<LibraryStore>,
    server: Option<Arc<RiffServerClient>>,
    player: Player,
    search: SearchAggregator,
}

impl PlayerSession {
    /// Validate `config` and build every component
    pub fn init(config: PlayerConfig) -> Result<Self> {
        config.validate()?;

        let catalog = Arc::new(load_catalog(&config)?);
        info!(tracks = catalog.len(), "Catalog loaded");

        let library = Arc::new(open_library(&config));

        let server = match &config.server.url {
            Some(url) => {
                let server_config = ServerConfig {
                    url: url.clone(),
                    api_key: config.server.api_key.clone(),
                };
                let client = Arc::new(RiffServerClient::new(server_config)?);
                info!(url = %client.url(), "Backend configured");
                Some(client)
            }
            None => {
                warn!("No backend configured, extraction and remote search disabled");
                None
            }
        };

        let resolver = match &server {
            Some(client) => {
                let extractor: Arc<dyn StreamExtractor> = client.clone();
                AudioResolver::new(extractor, config.resolver.clone())
            }
            None => AudioResolver::without_extractor(config.resolver.clone()),
        };

        let history: Arc<dyn PlayHistory> = library.clone();
        let player = Player::new(config.playback.clone(), resolver).with_history(history);

        let provider = server
            .clone()
            .map(|client| client as Arc<dyn RemoteSearchProvider>);
        let search = SearchAggregator::new(Arc::clone(&catalog), provider, config.search.clone());

        info!("Player session ready");
        Ok(Self {
            config,
            catalog,
            library,
            server,
            player,
            search,
        })
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn library(&self) -> &LibraryStore {
        &self.library
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn search(&self) -> &SearchAggregator {
        &self.search
    }

    /// Backend client, if one is configured
    pub fn server(&self) -> Option<&RiffServerClient> {
        self.server.as_deref()
    }

    /// Find a track the session knows about
    ///
    /// Looks in the catalog, then the last remote results, then the library.
    pub fn find_track(&self, id: &str) -> Result<Track> {
        let id = TrackId::new(id);

        if let Some(track) = self.catalog.get(&id) {
            return Ok(track.clone());
        }

        if let Some(track) = self.search.results().into_iter().find(|t| t.id == id) {
            return Ok(track);
        }

        let data = self.library.snapshot()?;
        let found = data
            .liked_tracks
            .iter()
            .chain(data.recently_played.iter())
            .chain(data.playlists.iter().flat_map(|p| p.tracks.iter()))
            .find(|t| t.id == id)
            .cloned();

        found.ok_or_else(|| AppError::TrackNotFound(id.to_string()))
    }

    /// Stop playback and drop in-flight searches
    pub fn shutdown(self) -> Result<()> {
        self.search.cancel();
        self.player.stop()?;
        info!("Player session closed");
        Ok(())
    }
}

// An unusable data directory degrades to a library kept in memory only
fn open_library(config: &PlayerConfig) -> LibraryStore {
    match JsonFileStore::open(&config.storage.data_dir) {
        Ok(backend) => LibraryStore::load(Box::new(backend)),
        Err(e) => {
            error!(
                data_dir = %config.storage.data_dir.display(),
                error = %e,
                "Failed to open library storage, changes will not be saved"
            );
            LibraryStore::in_memory()
        }
    }
}

fn load_catalog(config: &PlayerConfig) -> Result<CatalogIndex> {
    match &config.catalog.path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            Ok(CatalogIndex::from_json(&json)?)
        }
        None => Ok(CatalogIndex::sample()?),
    }
}

impl std::fmt::Debug for PlayerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerSession")
            .field("catalog_tracks", &self.catalog.len())
            .field("server", &self.server.as_ref().map(|s| s.url()))
            .finish_non_exhaustive()
    }
}
