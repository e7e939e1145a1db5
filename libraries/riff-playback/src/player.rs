//! Async player facade
//!
//! Wraps a [`PlaybackManager`] with the [`AudioResolver`] and an optional
//! [`PlayHistory`] sink. The state lock is never held across an `await`: a
//! request takes a ticket under the lock, resolves without it, and re-locks
//! to commit. Every change is broadcast as a [`PlayerState`] snapshot on a
//! `watch` channel.

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    manager::{PlayTicket, PlaybackManager},
    resolver::AudioResolver,
    surface::{SurfaceEvent, SurfaceFactory},
    types::{Direction, PlayOutcome, PlaybackConfig, PlayerState},
};
use riff_core::{PlayHistory, RepeatMode, Track};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::debug;

/// Player instance owned by a hosting session
pub struct Player {
    manager: Mutex<PlaybackManager>,
    resolver: AudioResolver,
    history: Option<Arc<dyn PlayHistory>>,
    state_tx: watch::Sender<PlayerState>,
}

impl Player {
    /// Create a player with default surfaces and no history sink
    pub fn new(config: PlaybackConfig, resolver: AudioResolver) -> Self {
        let manager = PlaybackManager::new(config);
        let (state_tx, _) = watch::channel(manager.snapshot());
        Self {
            manager: Mutex::new(manager),
            resolver,
            history: None,
            state_tx,
        }
    }

    /// Use a custom surface factory
    #[must_use]
    pub fn with_surface_factory(mut self, factory: Arc<dyn SurfaceFactory>) -> Self {
        self.manager
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .set_surface_factory(factory);
        self
    }

    /// Notify `history` after every successful play request
    #[must_use]
    pub fn with_history(mut self, history: Arc<dyn PlayHistory>) -> Self {
        self.history = Some(history);
        self
    }

    /// Receiver for state snapshots
    pub fn subscribe(&self) -> watch::Receiver<PlayerState> {
        self.state_tx.subscribe()
    }

    /// Current state snapshot
    pub fn snapshot(&self) -> Result<PlayerState> {
        Ok(self.lock()?.snapshot())
    }

    /// Resolver used for play requests
    pub fn resolver(&self) -> &AudioResolver {
        &self.resolver
    }

    // ===== Play Requests =====

    /// Play `track` with `context` as the queue
    ///
    /// Resolves the source before committing. If another request is issued
    /// while this one resolves, this one returns [`PlayOutcome::Superseded`].
    pub async fn request_play(&self, track: Track, context: Vec<Track>) -> Result<PlayOutcome> {
        let ticket = self.update(|m| m.begin_play(track, context))?;
        self.run(ticket).await
    }

    /// Skip to the next track
    pub async fn next(&self) -> Result<PlayOutcome> {
        self.advance(Direction::Next).await
    }

    /// Go back to the previous track
    pub async fn previous(&self) -> Result<PlayOutcome> {
        self.advance(Direction::Previous).await
    }

    async fn advance(&self, direction: Direction) -> Result<PlayOutcome> {
        match self.update(|m| m.begin_advance(direction))? {
            Some(ticket) => self.run(ticket).await,
            None => Ok(PlayOutcome::Unchanged),
        }
    }

    /// Feed an event from the surface loaded for `load_id`
    ///
    /// When the event ends the track and more is queued, the follow-up play
    /// request runs before this returns.
    pub async fn handle_surface_event(&self, load_id: u64, event: SurfaceEvent) -> Result<PlayOutcome> {
        match self.update(|m| m.handle_surface_event(load_id, event))? {
            Some(ticket) => self.run(ticket).await,
            None => Ok(PlayOutcome::Unchanged),
        }
    }

    async fn run(&self, ticket: PlayTicket) -> Result<PlayOutcome> {
        let track = ticket.track.clone();
        let result = self.resolver.resolve(&track).await;

        let outcome = self.update(|m| m.complete_play(ticket, result))??;

        if matches!(outcome, PlayOutcome::Started(_)) {
            if let Some(history) = &self.history {
                history.record_play(&track);
            }
        } else {
            debug!(track_id = %track.id, outcome = ?outcome, "Play request did not start");
        }
        Ok(outcome)
    }

    // ===== Controls =====

    /// Pause playback
    pub fn pause(&self) -> Result<()> {
        self.update(PlaybackManager::pause)
    }

    /// Resume playback
    pub fn resume(&self) -> Result<()> {
        self.update(PlaybackManager::resume)
    }

    /// Seek to a percentage of the track
    pub fn seek(&self, percent: f64) -> Result<()> {
        self.update(|m| m.seek(percent))
    }

    /// Set volume (0.0-1.0)
    pub fn set_volume(&self, level: f32) -> Result<()> {
        self.update(|m| m.set_volume(level))
    }

    /// Toggle mute, returns the new state
    pub fn toggle_mute(&self) -> Result<bool> {
        self.update(PlaybackManager::toggle_mute)
    }

    /// Flip shuffle, returns the new state
    pub fn toggle_shuffle(&self) -> Result<bool> {
        self.update(PlaybackManager::toggle_shuffle)
    }

    /// Cycle repeat mode, returns the new mode
    pub fn toggle_repeat(&self) -> Result<RepeatMode> {
        self.update(PlaybackManager::toggle_repeat)
    }

    /// Stop playback and release the surface
    pub fn stop(&self) -> Result<()> {
        self.update(PlaybackManager::stop)
    }

    /// Take all queued playback events
    pub fn drain_events(&self) -> Result<Vec<PlaybackEvent>> {
        Ok(self.lock()?.drain_events())
    }

    fn lock(&self) -> Result<MutexGuard<'_, PlaybackManager>> {
        self.manager.lock().map_err(|_| PlaybackError::StatePoisoned)
    }

    // Apply a mutation and publish the resulting snapshot
    fn update<T>(&self, f: impl FnOnce(&mut PlaybackManager) -> T) -> Result<T> {
        let mut manager = self.lock()?;
        let out = f(&mut manager);
        self.state_tx.send_replace(manager.snapshot());
        Ok(out)
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("resolver", &self.resolver)
            .field("has_history", &self.history.is_some())
            .finish_non_exhaustive()
    }
}
