//! Riff - Playback Management
//!
//! Platform-agnostic playback engine for Riff.
//!
//! This crate provides:
//! - Playback state machine (idle, loading, playing, paused)
//! - Last-request-wins play requests under rapid input
//! - Queue navigation (next/previous, shuffle, repeat none/track/playlist)
//! - Tiered audio source resolution (extraction, embed, watch URL)
//! - Playback surfaces (native element, hidden embedded widget)
//! - Volume with mute, seek, progress and duration correction
//!
//! # Architecture
//!
//! `riff-playback` does no decoding and no I/O of its own:
//! - Stream extraction is reached through `riff_core::StreamExtractor`
//! - Recently-played bookkeeping goes through `riff_core::PlayHistory`
//! - Rendering is abstracted by [`PlaybackSurface`]
//!
//! [`PlaybackManager`] is the synchronous state machine. [`Player`] wraps it
//! for async callers and publishes snapshots on a `watch` channel.
//!
//! # Example: Queue Navigation
//!
//! ```rust
//! use riff_core::RepeatMode;
//! use riff_playback::{navigate, Direction};
//!
//! // Last of three tracks: wraps only when the whole queue repeats
//! assert_eq!(navigate(3, Some(2), false, RepeatMode::None, Direction::Next), None);
//! assert_eq!(navigate(3, Some(2), false, RepeatMode::Playlist, Direction::Next), Some(0));
//! ```
//!
//! # Example: Driving the State Machine
//!
//! ```rust
//! use riff_core::Track;
//! use riff_playback::{PlaybackManager, PlaybackStatus, ResolvedSource};
//!
//! let mut manager = PlaybackManager::default();
//! let track = Track::new("t1", "Midnight Drive", "https://cdn.example.com/t1.mp3");
//!
//! let ticket = manager.begin_play(track.clone(), vec![track.clone()]);
//! assert_eq!(manager.status(), PlaybackStatus::Loading);
//!
//! manager
//!     .complete_play(ticket, Ok(ResolvedSource::direct(track.source_ref.clone())))
//!     .unwrap();
//! assert_eq!(manager.status(), PlaybackStatus::Playing);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod events;
pub mod manager;
pub mod navigator;
pub mod player;
pub mod queue;
pub mod resolver;
pub mod shuffle;
pub mod surface;
pub mod types;
pub mod volume;

// Re-export main types
pub use error::{PlaybackError, ResolutionError, Result};
pub use events::PlaybackEvent;
pub use manager::{PlayTicket, PlaybackManager};
pub use navigator::{navigate, navigate_with};
pub use player::Player;
pub use queue::Queue;
pub use resolver::{extract_identifier, AudioResolver, ResolverConfig};
pub use surface::{
    DefaultSurfaceFactory, EmbedPlayerVars, EmbeddedSurface, NativeSurface, PlaybackSurface,
    SurfaceEvent, SurfaceFactory, SurfaceKind, SurfaceState,
};
pub use types::{
    Direction, PlayOutcome, PlaybackConfig, PlaybackStatus, PlayerState, ResolutionTier,
    ResolvedSource, SourceMode, TierFailure, ESTIMATED_DURATION_SECS,
};
pub use volume::Volume;
