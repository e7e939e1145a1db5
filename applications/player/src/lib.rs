//! Riff Player Library
//!
//! Session wiring for the Riff player: configuration, dependency injection
//! of the catalog, library store, backend client, resolver, player and
//! search aggregator.
//!
//! This library exposes the components the `riff-player` binary drives, so
//! they can be tested without the CLI.

pub mod config;
pub mod error;
pub mod session;

pub use config::{CatalogSettings, PlayerConfig, ServerSettings, StorageSettings};
pub use error::{AppError, Result};
pub use session::PlayerSession;
