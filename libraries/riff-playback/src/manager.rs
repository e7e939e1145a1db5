//! Playback manager - the playback state machine
//!
//! Owns the current track, queue, modes, volume and the active playback
//! surface. It is synchronous: play requests are split into a `begin_*` step
//! that issues a [`PlayTicket`] and moves to `Loading`, and
//! [`PlaybackManager::complete_play`] which commits the resolved source. The
//! caller resolves the ticket's track in between (see [`crate::Player`]).
//!
//! Every ticket carries a monotonically increasing request id. Only the most
//! recently issued ticket may commit or report failure; older tickets are
//! reported as superseded and leave the state untouched.

use crate::{
    error::{PlaybackError, ResolutionError, Result},
    events::PlaybackEvent,
    navigator::navigate,
    queue::Queue,
    surface::{DefaultSurfaceFactory, PlaybackSurface, SurfaceEvent, SurfaceFactory},
    types::{Direction, PlayOutcome, PlaybackConfig, PlaybackStatus, PlayerState, ResolvedSource},
    volume::Volume,
};
use riff_core::{RepeatMode, Track};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A play request waiting for its source to be resolved
#[derive(Debug, Clone)]
pub struct PlayTicket {
    /// Request id; only the latest issued id may commit
    pub request_id: u64,

    /// Track to resolve
    pub track: Track,

    queue: Queue,
}

impl PlayTicket {
    /// Queue that becomes active if this request commits
    pub fn queue(&self) -> &Queue {
        &self.queue
    }
}

#[derive(Debug, Clone)]
struct PendingRequest {
    request_id: u64,
    track: Track,
    // Status before the first request of a burst
    prior_status: PlaybackStatus,
}

/// Playback state machine
pub struct PlaybackManager {
    config: PlaybackConfig,
    status: PlaybackStatus,
    current_track: Option<Track>,
    queue: Queue,
    volume: Volume,

    // Position as a percentage of `duration`
    progress: f64,
    duration: f64,
    duration_estimated: bool,

    shuffle: bool,
    repeat: RepeatMode,

    source: Option<ResolvedSource>,
    surface: Option<Box<dyn PlaybackSurface>>,
    surface_factory: Arc<dyn SurfaceFactory>,
    load_id: Option<u64>,

    next_request_id: u64,
    pending: Option<PendingRequest>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackManager {
    /// Create new playback manager using the default surfaces
    pub fn new(config: PlaybackConfig) -> Self {
        Self::with_surface_factory(config, Arc::new(DefaultSurfaceFactory))
    }

    /// Create new playback manager with a custom surface factory
    pub fn with_surface_factory(config: PlaybackConfig, surface_factory: Arc<dyn SurfaceFactory>) -> Self {
        Self {
            status: PlaybackStatus::Idle,
            current_track: None,
            queue: Queue::new(),
            volume: Volume::new(config.volume),
            progress: 0.0,
            duration: 0.0,
            duration_estimated: false,
            shuffle: config.shuffle,
            repeat: config.repeat,
            source: None,
            surface: None,
            surface_factory,
            load_id: None,
            next_request_id: 0,
            pending: None,
            pending_events: Vec::new(),
            config,
        }
    }

    /// Replace the surface factory used for future loads
    pub fn set_surface_factory(&mut self, surface_factory: Arc<dyn SurfaceFactory>) {
        self.surface_factory = surface_factory;
    }

    // ===== Play Requests =====

    /// Request playback of `track` picked from `context`
    ///
    /// Moves to `Loading` from any state. If the track is not part of the
    /// context it is prepended to the queue.
    pub fn begin_play(&mut self, track: Track, context: Vec<Track>) -> PlayTicket {
        let queue = Queue::from_context(context, &track);
        self.issue_ticket(track, queue)
    }

    /// Request playback of the queue entry at `index`
    pub fn begin_play_at(&mut self, index: usize) -> Option<PlayTicket> {
        let track = self.queue.get(index)?.clone();
        let mut queue = self.queue.clone();
        queue.set_current(index);
        Some(self.issue_ticket(track, queue))
    }

    /// Request the next/previous track
    ///
    /// Returns `None` (state unchanged) when the navigator finds nothing in
    /// that direction.
    pub fn begin_advance(&mut self, direction: Direction) -> Option<PlayTicket> {
        let index = navigate(
            self.queue.len(),
            self.queue.current_index(),
            self.shuffle,
            self.repeat,
            direction,
        );
        match index {
            Some(index) => self.begin_play_at(index),
            None => {
                debug!(direction = ?direction, "No track to advance to");
                None
            }
        }
    }

    fn issue_ticket(&mut self, track: Track, queue: Queue) -> PlayTicket {
        self.next_request_id += 1;
        let request_id = self.next_request_id;

        let prior_status = self
            .pending
            .as_ref()
            .map_or(self.status, |pending| pending.prior_status);

        debug!(request_id, track_id = %track.id, "Play requested");
        self.pending = Some(PendingRequest {
            request_id,
            track: track.clone(),
            prior_status,
        });
        self.pending_events.push(PlaybackEvent::LoadingStarted {
            request_id,
            track_id: track.id.clone(),
        });
        self.set_status(PlaybackStatus::Loading);

        PlayTicket {
            request_id,
            track,
            queue,
        }
    }

    /// Apply the resolution result of a ticket
    ///
    /// - Stale ticket: `Ok(PlayOutcome::Superseded)`, nothing changes
    /// - Resolution error: status returns to what it was before the request
    ///   and the error is returned
    /// - Success: the track becomes current and starts playing
    pub fn complete_play(
        &mut self,
        ticket: PlayTicket,
        result: std::result::Result<ResolvedSource, ResolutionError>,
    ) -> Result<PlayOutcome> {
        let is_latest = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.request_id == ticket.request_id);
        if !is_latest {
            debug!(request_id = ticket.request_id, "Discarding superseded play request");
            return Ok(PlayOutcome::Superseded);
        }
        let Some(pending) = self.pending.take() else {
            return Ok(PlayOutcome::Superseded);
        };

        match result {
            Ok(source) => {
                self.commit(ticket, source.clone());
                Ok(PlayOutcome::Started(source))
            }
            Err(err) => {
                warn!(track_id = %ticket.track.id, error = %err, "Play request failed");
                self.set_status(pending.prior_status);
                self.pending_events.push(PlaybackEvent::Error {
                    message: err.to_string(),
                });
                Err(PlaybackError::Resolution(err))
            }
        }
    }

    fn commit(&mut self, ticket: PlayTicket, source: ResolvedSource) {
        let PlayTicket {
            request_id,
            track,
            queue,
        } = ticket;

        for failure in &source.degraded {
            self.pending_events.push(PlaybackEvent::ResolutionDegraded {
                tier: failure.tier,
                reason: failure.reason.clone(),
            });
        }
        if let Some(message) = &source.warning {
            self.pending_events.push(PlaybackEvent::ResolutionWarning {
                message: message.clone(),
            });
        }

        let previous_track_id = self.current_track.as_ref().map(|t| t.id.clone());

        if track.duration > 0 {
            self.duration = f64::from(track.duration);
            self.duration_estimated = false;
        } else {
            self.duration = self.config.estimated_duration_secs;
            self.duration_estimated = true;
        }
        self.progress = 0.0;

        if let Some(mut old) = self.surface.take() {
            old.stop();
        }
        let mut surface = self.surface_factory.create(source.mode);
        surface.load(&source);
        surface.set_volume(self.volume.effective());
        surface.play();
        self.surface = Some(surface);
        self.load_id = Some(request_id);

        info!(track_id = %track.id, mode = ?source.mode, "Now playing");

        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
        });
        self.queue = queue;
        self.current_track = Some(track);
        self.source = Some(source);
        self.set_status(PlaybackStatus::Playing);
    }

    // ===== Surface Events =====

    /// Handle an event reported by the surface loaded for `load_id`
    ///
    /// Events from older loads are ignored. Returns a ticket when the event
    /// triggers a new play request (track ended with more to play).
    pub fn handle_surface_event(&mut self, load_id: u64, event: SurfaceEvent) -> Option<PlayTicket> {
        if self.load_id != Some(load_id) {
            debug!(load_id, current = ?self.load_id, "Ignoring event from stale surface");
            return None;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.on_event(&event);
        }

        match event {
            SurfaceEvent::LoadedMetadata { duration } => {
                self.correct_duration(duration);
                None
            }
            SurfaceEvent::TimeUpdate { current_time } => {
                if self.duration > 0.0 && current_time.is_finite() {
                    self.progress = (current_time / self.duration * 100.0).clamp(0.0, 100.0);
                    self.pending_events.push(PlaybackEvent::ProgressUpdated {
                        progress: self.progress,
                    });
                }
                None
            }
            SurfaceEvent::Ended => self.on_track_ended(),
            SurfaceEvent::Error { message } => {
                warn!(load_id, error = %message, "Playback surface error");
                if let Some(surface) = self.surface.as_mut() {
                    surface.pause();
                }
                self.pending_events.push(PlaybackEvent::Error { message });
                if self.status == PlaybackStatus::Playing {
                    self.set_status(PlaybackStatus::Paused);
                }
                None
            }
        }
    }

    fn correct_duration(&mut self, duration: f64) {
        if !duration.is_finite() || duration <= 0.0 {
            return;
        }
        self.duration = duration;
        self.duration_estimated = false;

        if let Some(track) = self.current_track.as_ref() {
            let corrected = track.with_duration(duration);
            if let Some(index) = self.queue.current_index() {
                self.queue.replace(index, corrected.clone());
            }
            self.pending_events.push(PlaybackEvent::DurationCorrected {
                track_id: corrected.id.clone(),
                duration,
            });
            self.current_track = Some(corrected);
        }
    }

    fn on_track_ended(&mut self) -> Option<PlayTicket> {
        if self.pending.is_some() {
            // A newer request owns what plays next
            return None;
        }
        self.progress = 100.0;

        // Park on the finished track; a failed follow-up request restores this
        if let Some(surface) = self.surface.as_mut() {
            surface.pause();
        }
        self.set_status(PlaybackStatus::Paused);

        if self.repeat == RepeatMode::Track {
            let index = self.queue.current_index()?;
            return self.begin_play_at(index);
        }

        if let Some(ticket) = self.begin_advance(Direction::Next) {
            return Some(ticket);
        }

        info!("Reached end of queue");
        self.pending_events.push(PlaybackEvent::QueueEnded);
        None
    }

    // ===== Playback Control =====

    /// Pause playback (`Playing` only)
    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            if let Some(surface) = self.surface.as_mut() {
                surface.pause();
            }
            self.set_status(PlaybackStatus::Paused);
        }
    }

    /// Resume playback (`Paused` with a current track only)
    ///
    /// Resuming a track parked at the end of the queue restarts it.
    pub fn resume(&mut self) {
        if self.status != PlaybackStatus::Paused || self.current_track.is_none() {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            if self.progress >= 100.0 {
                surface.seek(0.0);
            }
            surface.play();
        }
        if self.progress >= 100.0 {
            self.progress = 0.0;
        }
        self.set_status(PlaybackStatus::Playing);
    }

    /// Stop playback, drop the current track and any pending request
    pub fn stop(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.stop();
        }
        self.pending = None;
        self.current_track = None;
        self.source = None;
        self.load_id = None;
        self.queue.clear();
        self.progress = 0.0;
        self.duration = 0.0;
        self.duration_estimated = false;
        self.set_status(PlaybackStatus::Idle);
    }

    /// Seek to a percentage of the current track (clamped to 0-100)
    pub fn seek(&mut self, percent: f64) {
        if !percent.is_finite() || self.current_track.is_none() {
            return;
        }
        self.progress = percent.clamp(0.0, 100.0);
        if self.duration > 0.0 {
            let seconds = self.progress * self.duration / 100.0;
            if let Some(surface) = self.surface.as_mut() {
                surface.seek(seconds);
            }
        }
        self.pending_events.push(PlaybackEvent::ProgressUpdated {
            progress: self.progress,
        });
    }

    // ===== Volume =====

    /// Set volume (0.0-1.0, clamped; non-finite ignored)
    pub fn set_volume(&mut self, level: f32) {
        if self.volume.set_level(level) {
            self.apply_volume();
        }
    }

    /// Toggle mute, returns the new mute state
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.volume.toggle_mute();
        self.apply_volume();
        muted
    }

    fn apply_volume(&mut self) {
        let effective = self.volume.effective();
        if let Some(surface) = self.surface.as_mut() {
            surface.set_volume(effective);
        }
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            muted: self.volume.is_muted(),
        });
    }

    // ===== Modes =====

    /// Flip shuffle; the queue order is left as-is
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.pending_events.push(PlaybackEvent::ShuffleChanged {
            enabled: self.shuffle,
        });
        self.shuffle
    }

    /// Cycle repeat mode none -> track -> playlist -> none
    pub fn toggle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.cycle();
        self.pending_events.push(PlaybackEvent::RepeatChanged { mode: self.repeat });
        self.repeat
    }

    // ===== State Queries =====

    /// Current status
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Current track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Active queue
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Whether a play request is waiting for resolution
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Immutable snapshot of the full player state
    pub fn snapshot(&self) -> PlayerState {
        PlayerState {
            status: self.status,
            current_track: self.current_track.clone(),
            is_playing: self.status == PlaybackStatus::Playing,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            progress: self.progress,
            duration: self.duration,
            duration_estimated: self.duration_estimated,
            queue: self.queue.tracks().to_vec(),
            current_index: self.queue.current_index(),
            shuffle: self.shuffle,
            repeat: self.repeat,
            source: self.source.clone(),
            pending_track: self.pending.as_ref().map(|p| p.track.clone()),
            load_id: self.load_id,
            surface: self.surface.as_ref().map(|s| s.state()),
        }
    }

    // ===== Events =====

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Whether events are waiting to be drained
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        if self.status != status {
            self.status = status;
            self.pending_events.push(PlaybackEvent::StateChanged { status });
        }
    }
}

impl Default for PlaybackManager {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

impl std::fmt::Debug for PlaybackManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackManager")
            .field("status", &self.status)
            .field("current_track", &self.current_track.as_ref().map(|t| &t.id))
            .field("queue_len", &self.queue.len())
            .field("pending", &self.pending.as_ref().map(|p| p.request_id))
            .finish_non_exhaustive()
    }
}
