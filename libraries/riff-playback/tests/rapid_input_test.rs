//! Rapid input tests for PlaybackManager
//!
//! Skip spamming, seeking while loading and toggling modes mid-request must
//! leave the state machine consistent.

use riff_core::{RepeatMode, Track};
use riff_playback::{
    PlayOutcome, PlaybackEvent, PlaybackManager, PlaybackStatus, ResolvedSource, SurfaceEvent,
};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn create_test_track(id: &str) -> Track {
    Track::new(id, format!("Track {}", id), format!("https://cdn.example.com/{}.mp3", id)).with_duration(180.0)
}

fn create_queue(n: usize) -> Vec<Track> {
    (0..n).map(|i| create_test_track(&format!("t{}", i))).collect()
}

fn resolve(manager: &mut PlaybackManager, ticket: riff_playback::PlayTicket) -> PlayOutcome {
    let source = ResolvedSource::direct(ticket.track.source_ref.clone());
    manager.complete_play(ticket, Ok(source)).unwrap()
}

fn playing(queue: &[Track], index: usize) -> PlaybackManager {
    let mut manager = PlaybackManager::default();
    let ticket = manager.begin_play(queue[index].clone(), queue.to_vec());
    resolve(&mut manager, ticket);
    manager
}

// ============================================================================
// SKIP SPAMMING
// ============================================================================

#[test]
fn skip_spam_navigates_from_committed_track() {
    let queue = create_queue(5);
    let mut manager = playing(&queue, 0);

    // Three skips before any resolves: each is computed from the committed
    // index, so all target t1 and only the last commits
    let tickets: Vec<_> = (0..3)
        .map(|_| manager.begin_advance(riff_playback::Direction::Next).unwrap())
        .collect();
    assert!(tickets.iter().all(|t| t.track.id.as_str() == "t1"));

    let mut started = 0;
    for ticket in tickets {
        if matches!(resolve(&mut manager, ticket), PlayOutcome::Started(_)) {
            started += 1;
        }
    }
    assert_eq!(started, 1);
    assert_eq!(manager.snapshot().current_index, Some(1));
}

#[test]
fn sequential_skips_walk_the_queue() {
    let queue = create_queue(4);
    let mut manager = playing(&queue, 0);

    for expected in 1..4 {
        let ticket = manager.begin_advance(riff_playback::Direction::Next).unwrap();
        resolve(&mut manager, ticket);
        assert_eq!(manager.snapshot().current_index, Some(expected));
    }
    assert!(manager.begin_advance(riff_playback::Direction::Next).is_none());
    assert_eq!(manager.status(), PlaybackStatus::Playing);
}

// ============================================================================
// INPUT WHILE LOADING
// ============================================================================

#[test]
fn pause_while_loading_is_noop() {
    let queue = create_queue(2);
    let mut manager = PlaybackManager::default();
    let ticket = manager.begin_play(queue[0].clone(), queue.clone());

    manager.pause();
    assert_eq!(manager.status(), PlaybackStatus::Loading);

    resolve(&mut manager, ticket);
    assert_eq!(manager.status(), PlaybackStatus::Playing);
}

#[test]
fn seek_while_loading_is_reset_on_commit() {
    let queue = create_queue(2);
    let mut manager = playing(&queue, 0);

    let ticket = manager.begin_advance(riff_playback::Direction::Next).unwrap();
    manager.seek(60.0);
    assert_eq!(manager.snapshot().progress, 60.0);

    resolve(&mut manager, ticket);
    assert_eq!(manager.snapshot().progress, 0.0);
}

#[test]
fn mode_toggles_survive_pending_request() {
    let queue = create_queue(3);
    let mut manager = playing(&queue, 0);

    let ticket = manager.begin_advance(riff_playback::Direction::Next).unwrap();
    manager.toggle_shuffle();
    manager.toggle_repeat();
    manager.set_volume(0.25);
    resolve(&mut manager, ticket);

    let state = manager.snapshot();
    assert!(state.shuffle);
    assert_eq!(state.repeat, RepeatMode::Track);
    assert_eq!(state.volume, 0.25);
    assert_eq!(state.surface.unwrap().volume, 0.25);
}

#[test]
fn ended_while_loading_defers_to_pending_request() {
    let queue = create_queue(3);
    let mut manager = playing(&queue, 0);
    let load_id = manager.snapshot().load_id.unwrap();

    let ticket = manager.begin_advance(riff_playback::Direction::Next).unwrap();
    assert!(manager.handle_surface_event(load_id, SurfaceEvent::Ended).is_none());

    resolve(&mut manager, ticket);
    assert_eq!(manager.snapshot().current_track.unwrap().id.as_str(), "t1");
}

#[test]
fn stop_while_loading_discards_late_result() {
    let queue = create_queue(2);
    let mut manager = PlaybackManager::default();
    let ticket = manager.begin_play(queue[0].clone(), queue.clone());

    manager.stop();
    assert_eq!(resolve(&mut manager, ticket), PlayOutcome::Superseded);
    assert_eq!(manager.status(), PlaybackStatus::Idle);
}

#[test]
fn failure_after_burst_restores_status_before_burst() {
    let queue = create_queue(3);
    let mut manager = playing(&queue, 0);
    manager.pause();

    let _first = manager.begin_play(queue[1].clone(), queue.clone());
    let second = manager.begin_play(queue[2].clone(), queue.clone());
    let result = manager.complete_play(
        second,
        Err(riff_playback::ResolutionError::EmptyTrackId),
    );

    assert!(result.is_err());
    assert_eq!(manager.status(), PlaybackStatus::Paused);
    assert_eq!(manager.snapshot().current_track.unwrap().id.as_str(), "t0");
}

#[test]
fn failed_follow_up_after_end_parks_finished_track() {
    let mut queue = create_queue(1);
    queue.push(Track::new("bad", "Broken", ""));
    let mut manager = playing(&queue, 0);
    let load_id = manager.snapshot().load_id.unwrap();

    let ticket = manager
        .handle_surface_event(load_id, SurfaceEvent::Ended)
        .unwrap();
    assert_eq!(ticket.track.id.as_str(), "bad");

    let result = manager.complete_play(
        ticket,
        Err(riff_playback::ResolutionError::EmptySourceRef(
            riff_core::TrackId::new("bad"),
        )),
    );
    assert!(result.is_err());

    let state = manager.snapshot();
    assert_eq!(state.status, PlaybackStatus::Paused);
    assert!(!state.is_playing);
    assert_eq!(state.progress, 100.0);
    assert_eq!(state.current_track.unwrap().id.as_str(), "t0");
    assert!(!state.surface.unwrap().playing);
}

#[test]
fn failed_repeat_after_end_parks_finished_track() {
    let queue = create_queue(2);
    let mut manager = playing(&queue, 0);
    manager.toggle_repeat();
    let load_id = manager.snapshot().load_id.unwrap();

    let ticket = manager
        .handle_surface_event(load_id, SurfaceEvent::Ended)
        .unwrap();
    let _ = manager.complete_play(ticket, Err(riff_playback::ResolutionError::EmptyTrackId));

    assert_eq!(manager.status(), PlaybackStatus::Paused);
    manager.resume();
    assert_eq!(manager.status(), PlaybackStatus::Playing);
    assert_eq!(manager.snapshot().progress, 0.0);
}

// ============================================================================
// EVENTS
// ============================================================================

#[test]
fn events_describe_a_play_request() {
    let queue = create_queue(2);
    let mut manager = PlaybackManager::default();
    let ticket = manager.begin_play(queue[1].clone(), queue.clone());
    resolve(&mut manager, ticket);

    let events = manager.drain_events();
    assert!(matches!(events.first(), Some(PlaybackEvent::LoadingStarted { request_id: 1, .. })));
    assert!(events.contains(&PlaybackEvent::StateChanged {
        status: PlaybackStatus::Loading
    }));
    assert!(events.iter().any(|e| matches!(
        e,
        PlaybackEvent::TrackChanged { track_id, previous_track_id: None } if track_id.as_str() == "t1"
    )));
    assert_eq!(
        events.last(),
        Some(&PlaybackEvent::StateChanged {
            status: PlaybackStatus::Playing
        })
    );
    assert!(!manager.has_pending_events());
}
