//! Property-based tests for queue navigation and the state machine
//!
//! Uses proptest to verify invariants across many random inputs.

use proptest::prelude::*;
use riff_core::{RepeatMode, Track};
use riff_playback::{navigate, Direction, PlaybackManager, PlaybackStatus, Queue, ResolvedSource};

// ===== Helpers =====

fn arbitrary_repeat() -> impl Strategy<Value = RepeatMode> {
    prop_oneof![
        Just(RepeatMode::None),
        Just(RepeatMode::Track),
        Just(RepeatMode::Playlist),
    ]
}

fn arbitrary_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Next), Just(Direction::Previous)]
}

fn tracks(n: usize) -> Vec<Track> {
    (0..n)
        .map(|i| Track::new(format!("t{i}"), format!("Track {i}"), format!("https://cdn.example.com/{i}.mp3")))
        .collect()
}

// ===== Property Tests =====

proptest! {
    /// Property: next at the last index stops unless the playlist repeats
    #[test]
    fn next_at_end(len in 1usize..50) {
        prop_assert_eq!(navigate(len, Some(len - 1), false, RepeatMode::None, Direction::Next), None);
        prop_assert_eq!(navigate(len, Some(len - 1), false, RepeatMode::Playlist, Direction::Next), Some(0));
    }

    /// Property: previous at index 0 is none regardless of repeat
    #[test]
    fn previous_at_start(len in 1usize..50, repeat in arbitrary_repeat()) {
        prop_assert_eq!(navigate(len, Some(0), false, repeat, Direction::Previous), None);
    }

    /// Property: navigation always lands inside the queue
    #[test]
    fn navigation_stays_in_bounds(
        len in 1usize..50,
        offset in 0usize..50,
        shuffle in any::<bool>(),
        repeat in arbitrary_repeat(),
        direction in arbitrary_direction(),
    ) {
        let current = offset % len;
        if let Some(index) = navigate(len, Some(current), shuffle, repeat, direction) {
            prop_assert!(index < len);
        }
    }

    /// Property: shuffle never picks the current track when there is a choice
    #[test]
    fn shuffle_moves_away(
        len in 2usize..50,
        offset in 0usize..50,
        repeat in arbitrary_repeat(),
        direction in arbitrary_direction(),
    ) {
        let current = offset % len;
        let index = navigate(len, Some(current), true, repeat, direction);
        prop_assert!(index.is_some());
        prop_assert_ne!(index, Some(current));
    }

    /// Property: the current index always points at the requested track
    #[test]
    fn queue_points_at_requested_track(len in 0usize..20, pick in 0usize..40) {
        let context = tracks(len);
        let requested = Track::new(format!("t{pick}"), "Requested", "https://cdn.example.com/r.mp3");
        let queue = Queue::from_context(context, &requested);

        prop_assert_eq!(&queue.current().unwrap().id, &requested.id);
        prop_assert!(queue.len() >= len.max(1));
    }

    /// Property: of a burst of play requests only the last one commits
    #[test]
    fn last_request_wins(count in 1usize..10, order in prop::collection::vec(0usize..10, 1..10)) {
        let context = tracks(count);
        let mut manager = PlaybackManager::default();

        let tickets: Vec<_> = (0..count)
            .map(|i| manager.begin_play(context[i].clone(), context.clone()))
            .collect();
        let last_id = context[count - 1].id.clone();

        // Complete in a scrambled order
        let mut pending: Vec<_> = tickets.into_iter().map(Some).collect();
        for i in order.into_iter().chain(0..count) {
            if let Some(ticket) = pending.get_mut(i % count).and_then(Option::take) {
                let source = ResolvedSource::direct(ticket.track.source_ref.clone());
                manager.complete_play(ticket, Ok(source)).unwrap();
            }
        }

        let state = manager.snapshot();
        prop_assert_eq!(state.status, PlaybackStatus::Playing);
        prop_assert_eq!(state.current_track.unwrap().id, last_id);
    }
}
