//! Next/previous index selection
//!
//! Pure functions over queue length and current position so the rules can be
//! tested without a player.

use crate::shuffle::pick_other_index;
use crate::types::Direction;
use rand::Rng;
use riff_core::RepeatMode;

/// Index to move to, or `None` when there is nothing in that direction
///
/// Rules:
/// - Shuffle with more than one track: a uniformly random index other than
///   the current one, for both directions
/// - Next: `current + 1`; past the end wraps to 0 only under
///   `RepeatMode::Playlist`
/// - Previous: `current - 1`; never wraps
///
/// `RepeatMode::Track` does not affect manual navigation, it only applies
/// when a track ends on its own.
pub fn navigate(
    len: usize,
    current: Option<usize>,
    shuffle: bool,
    repeat: RepeatMode,
    direction: Direction,
) -> Option<usize> {
    navigate_with(len, current, shuffle, repeat, direction, &mut rand::thread_rng())
}

/// [`navigate`] with an explicit random source
pub fn navigate_with<R: Rng + ?Sized>(
    len: usize,
    current: Option<usize>,
    shuffle: bool,
    repeat: RepeatMode,
    direction: Direction,
    rng: &mut R,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.filter(|&i| i < len)?;

    if shuffle && len > 1 {
        return pick_other_index(len, Some(current), rng);
    }

    match direction {
        Direction::Next => {
            if current + 1 < len {
                Some(current + 1)
            } else if repeat == RepeatMode::Playlist {
                Some(0)
            } else {
                None
            }
        }
        Direction::Previous => current.checked_sub(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_advances() {
        assert_eq!(navigate(3, Some(0), false, RepeatMode::None, Direction::Next), Some(1));
    }

    #[test]
    fn next_at_end_stops_without_repeat() {
        assert_eq!(navigate(3, Some(2), false, RepeatMode::None, Direction::Next), None);
        assert_eq!(navigate(3, Some(2), false, RepeatMode::Track, Direction::Next), None);
    }

    #[test]
    fn next_at_end_wraps_with_repeat_playlist() {
        assert_eq!(navigate(3, Some(2), false, RepeatMode::Playlist, Direction::Next), Some(0));
    }

    #[test]
    fn previous_never_wraps() {
        assert_eq!(navigate(3, Some(0), false, RepeatMode::Playlist, Direction::Previous), None);
        assert_eq!(navigate(3, Some(2), false, RepeatMode::None, Direction::Previous), Some(1));
    }

    #[test]
    fn shuffle_single_track_falls_back_to_sequential() {
        assert_eq!(navigate(1, Some(0), true, RepeatMode::None, Direction::Next), None);
        assert_eq!(navigate(1, Some(0), true, RepeatMode::Playlist, Direction::Next), Some(0));
    }

    #[test]
    fn shuffle_picks_other_track() {
        for _ in 0..100 {
            let next = navigate(4, Some(3), true, RepeatMode::None, Direction::Next).unwrap();
            assert_ne!(next, 3);
            let prev = navigate(4, Some(0), true, RepeatMode::None, Direction::Previous).unwrap();
            assert_ne!(prev, 0);
        }
    }

    #[test]
    fn empty_or_unpositioned_queue() {
        assert_eq!(navigate(0, None, false, RepeatMode::Playlist, Direction::Next), None);
        assert_eq!(navigate(3, None, false, RepeatMode::Playlist, Direction::Next), None);
    }
}
