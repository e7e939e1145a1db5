//! Core types for playback management

use crate::surface::SurfaceState;
use riff_core::{RepeatMode, Track};
use serde::{Deserialize, Serialize};

/// Default length assumed for a track whose real duration is not known yet
pub const ESTIMATED_DURATION_SECS: f64 = 180.0;

/// Playback state machine status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// No track loaded
    #[default]
    Idle,

    /// Resolving the audio source for a requested track
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track (or parked at the end of the queue)
    Paused,
}

/// Queue navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Forward in the queue
    Next,

    /// Backward in the queue
    Previous,
}

/// How a resolved URL must be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Playable by a native audio element
    Direct,

    /// Needs a hidden embeddable widget
    Embed,

    /// Canonical watch page; likely not playable, shown with a warning
    Raw,
}

/// One strategy in the resolution fallback chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionTier {
    /// Tier A: backend stream extraction
    Extraction,

    /// Tier B: embeddable player URL
    Embed,

    /// Tier C: canonical watch URL
    Watch,
}

/// A tier that failed and was skipped during resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierFailure {
    /// Tier that failed
    pub tier: ResolutionTier,

    /// Human-readable cause
    pub reason: String,
}

/// Result of resolving a track reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSource {
    /// Playable (or best-effort) location
    pub url: String,

    /// Rendering mode for the playback surface
    pub mode: SourceMode,

    /// Provider identifier, when the reference was a provider URL
    pub identifier: Option<String>,

    /// Tiers that failed before this one succeeded
    pub degraded: Vec<TierFailure>,

    /// Soft warning for the user (set for `raw` results)
    pub warning: Option<String>,
}

impl ResolvedSource {
    /// Source that plays the reference as-is
    pub fn direct(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mode: SourceMode::Direct,
            identifier: None,
            degraded: Vec::new(),
            warning: None,
        }
    }

    /// Whether any tier had to be skipped
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

/// Configuration for the playback state machine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 0.7)
    pub volume: f32,

    /// Initial shuffle state (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: none)
    pub repeat: RepeatMode,

    /// Duration assumed until the surface reports the real one (default: 180 s)
    pub estimated_duration_secs: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 0.7,
            shuffle: false,
            repeat: RepeatMode::None,
            estimated_duration_secs: ESTIMATED_DURATION_SECS,
        }
    }
}

/// Immutable snapshot of the player, published after every change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// State machine status
    pub status: PlaybackStatus,

    /// Track currently loaded on the surface
    pub current_track: Option<Track>,

    /// Convenience flag, true only in `Playing`
    pub is_playing: bool,

    /// Volume level (0.0-1.0), independent of mute
    pub volume: f32,

    /// Whether output is muted
    pub muted: bool,

    /// Position as a percentage of `duration` (0-100)
    pub progress: f64,

    /// Duration in seconds
    pub duration: f64,

    /// True while `duration` is the placeholder estimate
    pub duration_estimated: bool,

    /// Queue being navigated
    pub queue: Vec<Track>,

    /// Index of `current_track` in `queue`
    pub current_index: Option<usize>,

    /// Shuffle flag
    pub shuffle: bool,

    /// Repeat mode
    pub repeat: RepeatMode,

    /// Resolved source of the current track
    pub source: Option<ResolvedSource>,

    /// Track being resolved while `Loading`
    pub pending_track: Option<Track>,

    /// Request id the current surface was loaded for; surface events must carry it
    pub load_id: Option<u64>,

    /// What the active playback surface reports
    pub surface: Option<SurfaceState>,
}

impl PlayerState {
    /// Position in seconds derived from progress and duration
    pub fn position_secs(&self) -> f64 {
        if self.duration > 0.0 {
            self.progress / 100.0 * self.duration
        } else {
            0.0
        }
    }
}

/// What a play request (or a follow-up to a surface event) ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum PlayOutcome {
    /// The requested track is now playing
    Started(ResolvedSource),

    /// A newer request was issued while this one resolved; result discarded
    Superseded,

    /// Nothing to play (no next/previous track); state unchanged
    Unchanged,
}
