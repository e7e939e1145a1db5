/// Player configuration
use crate::error::{AppError, Result};
use riff_discovery::SearchConfig;
use riff_playback::{PlaybackConfig, ResolverConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "riff.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

/// Extraction/search backend. Without a URL the player runs offline.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// Track catalog source. The bundled sample catalog is used without a path.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl PlayerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given; otherwise `riff.toml` is read if present.
    /// `RIFF_` variables override file values, e.g. `RIFF_SERVER__URL` or
    /// `RIFF_STORAGE__DATA_DIR`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("RIFF")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// Parse a TOML document, without environment overrides
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.server.url {
            let url = url.trim();
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AppError::Config(format!(
                    "server.url must start with http:// or https:// (got {url:?})"
                )));
            }
        }

        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("storage.data_dir cannot be empty".to_string()));
        }

        let volume = self.playback.volume;
        if !volume.is_finite() || !(0.0..=1.0).contains(&volume) {
            return Err(AppError::Config(format!(
                "playback.volume must be between 0.0 and 1.0 (got {volume})"
            )));
        }

        let estimated = self.playback.estimated_duration_secs;
        if !estimated.is_finite() || estimated <= 0.0 {
            return Err(AppError::Config(
                "playback.estimated_duration_secs must be positive".to_string(),
            ));
        }

        if self.resolver.tier_timeout_ms == 0 {
            return Err(AppError::Config(
                "resolver.tier_timeout_ms must be positive".to_string(),
            ));
        }

        if self.search.max_results == 0 {
            return Err(AppError::Config(
                "search.max_results must be positive".to_string(),
            ));
        }

        if let Some(path) = &self.catalog.path {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "Catalog not found at {:?}",
                    path
                )));
            }
        }

        Ok(())
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        data_dir: default_data_dir(),
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            storage: default_storage(),
            search: SearchConfig::default(),
            playback: PlaybackConfig::default(),
            resolver: ResolverConfig::default(),
            catalog: CatalogSettings::default(),
        }
    }
}
