//! Volume level with mute

/// Linear volume in 0.0-1.0 with a mute flag that preserves the level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    level: f32,
    muted: bool,
}

impl Volume {
    /// Create a volume controller; the level is clamped to 0.0-1.0
    pub fn new(level: f32) -> Self {
        let mut volume = Self {
            level: 0.7,
            muted: false,
        };
        volume.set_level(level);
        volume
    }

    /// Set the level (clamped). Non-finite values are ignored.
    ///
    /// Setting a level while muted unmutes, the way a volume slider does.
    /// Returns whether anything changed.
    pub fn set_level(&mut self, level: f32) -> bool {
        if !level.is_finite() {
            return false;
        }
        let level = level.clamp(0.0, 1.0);
        let changed = level != self.level || self.muted;
        self.level = level;
        self.muted = false;
        changed
    }

    /// Current level (0.0-1.0), independent of mute
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Mute (level preserved)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute (restores the preserved level)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state, returns the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level to apply to the output: 0.0 when muted
    pub fn effective(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_level() {
        assert_eq!(Volume::new(1.5).level(), 1.0);
        assert_eq!(Volume::new(-0.2).level(), 0.0);
    }

    #[test]
    fn non_finite_is_ignored() {
        let mut volume = Volume::new(0.4);
        assert!(!volume.set_level(f32::NAN));
        assert!(!volume.set_level(f32::INFINITY));
        assert_eq!(volume.level(), 0.4);
    }

    #[test]
    fn mute_preserves_level() {
        let mut volume = Volume::new(0.5);
        assert!(volume.toggle_mute());
        assert_eq!(volume.effective(), 0.0);
        assert_eq!(volume.level(), 0.5);
        assert!(!volume.toggle_mute());
        assert_eq!(volume.effective(), 0.5);
    }

    #[test]
    fn setting_level_unmutes() {
        let mut volume = Volume::new(0.5);
        volume.mute();
        assert!(volume.set_level(0.5));
        assert!(!volume.is_muted());
    }
}
