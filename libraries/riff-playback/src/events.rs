//! Playback Events
//!
//! Emitted by the state machine at key points and drained by the host:
//! - Status changes (loading/playing/paused/idle)
//! - Track changes
//! - Resolution degradation and warnings
//! - Progress and duration updates

use crate::types::{PlaybackStatus, ResolutionTier};
use riff_core::{RepeatMode, TrackId};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Status changed
    StateChanged {
        /// The new status
        status: PlaybackStatus,
    },

    /// A play request started resolving
    LoadingStarted {
        /// Request ticket
        request_id: u64,
        /// Track being resolved
        track_id: TrackId,
    },

    /// A different track is now current
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// A resolution tier failed and the next one was used
    ResolutionDegraded {
        /// Tier that failed
        tier: ResolutionTier,
        /// Cause
        reason: String,
    },

    /// Source resolved to a best-effort URL that may not play
    ResolutionWarning {
        /// Warning text
        message: String,
    },

    /// Position update from the surface
    ProgressUpdated {
        /// Percentage 0-100
        progress: f64,
    },

    /// Surface reported the real duration, replacing the estimate
    DurationCorrected {
        /// Track whose duration changed
        track_id: TrackId,
        /// New duration in seconds
        duration: f64,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// Level 0.0-1.0
        level: f32,
        /// Mute state
        muted: bool,
    },

    /// Shuffle toggled
    ShuffleChanged {
        /// New state
        enabled: bool,
    },

    /// Repeat mode cycled
    RepeatChanged {
        /// New mode
        mode: RepeatMode,
    },

    /// The last track ended with nothing left to play
    QueueEnded,

    /// Error occurred
    Error {
        /// Error message
        message: String,
    },
}
