//! Playback surfaces
//!
//! A surface is the thing that actually renders audio: a native audio element
//! for direct streams or a hidden embedded widget for embeddable players. The
//! state machine only talks to the [`PlaybackSurface`] trait; which variant is
//! used is decided by a [`SurfaceFactory`] from the resolved [`SourceMode`].
//!
//! Surfaces report back through [`SurfaceEvent`]s tagged with the load id the
//! surface was created for, so events from a replaced surface are dropped.

use crate::types::{ResolvedSource, SourceMode};
use serde::{Deserialize, Serialize};

/// Surface variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// Native audio element
    Native,

    /// Hidden embeddable player widget
    Embedded,
}

/// Events a surface reports to the state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// Metadata loaded; real duration known
    LoadedMetadata {
        /// Duration in seconds
        duration: f64,
    },

    /// Playback position moved
    TimeUpdate {
        /// Position in seconds
        current_time: f64,
    },

    /// Reached the end of the media
    Ended,

    /// Media failed to load or play
    Error {
        /// Error description
        message: String,
    },
}

/// Observable surface state (what a host would render)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceState {
    /// Variant
    pub kind: SurfaceKind,

    /// Loaded URL
    pub url: Option<String>,

    /// Whether the surface is producing sound
    pub playing: bool,

    /// Last seek target in seconds
    pub position: f64,

    /// Volume as the surface understands it (0.0-1.0 native, 0-100 embedded)
    pub volume: f32,

    /// Whether the surface is visible to the user
    pub visible: bool,
}

/// Audio rendering target
///
/// Implementations must be `Send` so the state machine can live behind a
/// mutex shared between tasks.
pub trait PlaybackSurface: Send {
    /// Surface variant
    fn kind(&self) -> SurfaceKind;

    /// Load a resolved source (does not start playback)
    fn load(&mut self, source: &ResolvedSource);

    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Seek to a position
    ///
    /// # Arguments
    /// * `seconds` - Target position from the start of the media
    fn seek(&mut self, seconds: f64);

    /// Apply a volume level
    ///
    /// # Arguments
    /// * `level` - Effective level 0.0-1.0 (0.0 when muted)
    fn set_volume(&mut self, level: f32);

    /// Observe an event this surface reported (default: ignore)
    fn on_event(&mut self, _event: &SurfaceEvent) {}

    /// Unload and release the surface
    fn stop(&mut self);

    /// Current observable state
    fn state(&self) -> SurfaceState;
}

/// Native audio element surface
#[derive(Debug, Clone, Default)]
pub struct NativeSurface {
    url: Option<String>,
    playing: bool,
    position: f64,
    volume: f32,
}

impl NativeSurface {
    /// Create an empty native surface
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlaybackSurface for NativeSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Native
    }

    fn load(&mut self, source: &ResolvedSource) {
        self.url = Some(source.url.clone());
        self.playing = false;
        self.position = 0.0;
    }

    fn play(&mut self) {
        if self.url.is_some() {
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds.max(0.0);
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = level.clamp(0.0, 1.0);
    }

    fn on_event(&mut self, event: &SurfaceEvent) {
        match event {
            SurfaceEvent::TimeUpdate { current_time } => self.position = *current_time,
            SurfaceEvent::Ended | SurfaceEvent::Error { .. } => self.playing = false,
            SurfaceEvent::LoadedMetadata { .. } => {}
        }
    }

    fn stop(&mut self) {
        self.url = None;
        self.playing = false;
        self.position = 0.0;
    }

    fn state(&self) -> SurfaceState {
        SurfaceState {
            kind: SurfaceKind::Native,
            url: self.url.clone(),
            playing: self.playing,
            position: self.position,
            volume: self.volume,
            visible: false,
        }
    }
}

/// Parameters the hidden embedded widget is created with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedPlayerVars {
    /// Start automatically once loaded (0: the state machine issues play)
    pub autoplay: u8,
    /// Show widget controls
    pub controls: u8,
    /// Keyboard shortcuts disabled
    pub disablekb: u8,
    /// Fullscreen button
    pub fs: u8,
    /// Reduced provider branding
    pub modestbranding: u8,
    /// Inline playback on mobile
    pub playsinline: u8,
}

impl Default for EmbedPlayerVars {
    fn default() -> Self {
        Self {
            autoplay: 0,
            controls: 0,
            disablekb: 1,
            fs: 0,
            modestbranding: 1,
            playsinline: 1,
        }
    }
}

/// Hidden embeddable player surface (zero-size, off-screen)
#[derive(Debug, Clone, Default)]
pub struct EmbeddedSurface {
    url: Option<String>,
    video_id: Option<String>,
    playing: bool,
    position: f64,
    volume: u8,
    vars: EmbedPlayerVars,
}

impl EmbeddedSurface {
    /// Create an empty embedded surface with default player vars
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider identifier the widget was loaded with
    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    /// Widget creation parameters
    pub fn player_vars(&self) -> &EmbedPlayerVars {
        &self.vars
    }

    /// Widget size in pixels; always hidden
    pub fn dimensions(&self) -> (u32, u32) {
        (0, 0)
    }
}

impl PlaybackSurface for EmbeddedSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Embedded
    }

    fn load(&mut self, source: &ResolvedSource) {
        self.url = Some(source.url.clone());
        self.video_id.clone_from(&source.identifier);
        self.playing = false;
        self.position = 0.0;
    }

    fn play(&mut self) {
        if self.url.is_some() {
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds.max(0.0);
    }

    fn set_volume(&mut self, level: f32) {
        // Widget API takes 0-100
        self.volume = (level.clamp(0.0, 1.0) * 100.0).round() as u8;
    }

    fn on_event(&mut self, event: &SurfaceEvent) {
        match event {
            SurfaceEvent::TimeUpdate { current_time } => self.position = *current_time,
            SurfaceEvent::Ended | SurfaceEvent::Error { .. } => self.playing = false,
            SurfaceEvent::LoadedMetadata { .. } => {}
        }
    }

    fn stop(&mut self) {
        self.url = None;
        self.video_id = None;
        self.playing = false;
        self.position = 0.0;
    }

    fn state(&self) -> SurfaceState {
        SurfaceState {
            kind: SurfaceKind::Embedded,
            url: self.url.clone(),
            playing: self.playing,
            position: self.position,
            volume: f32::from(self.volume),
            visible: false,
        }
    }
}

/// Creates the surface variant for a source mode
pub trait SurfaceFactory: Send + Sync {
    /// New surface able to render `mode`
    fn create(&self, mode: SourceMode) -> Box<dyn PlaybackSurface>;
}

/// Native for `direct` and `raw`, embedded for `embed`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSurfaceFactory;

impl SurfaceFactory for DefaultSurfaceFactory {
    fn create(&self, mode: SourceMode) -> Box<dyn PlaybackSurface> {
        match mode {
            SourceMode::Embed => Box::new(EmbeddedSurface::new()),
            SourceMode::Direct | SourceMode::Raw => Box::new(NativeSurface::new()),
        }
    }
}
