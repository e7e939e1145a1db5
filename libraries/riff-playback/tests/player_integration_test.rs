//! Integration tests for the async player
//!
//! Drives `Player` end to end with fake collaborators: stream extraction,
//! play history and surface events.

use async_trait::async_trait;
use riff_core::{ExtractedStream, PlayHistory, RemoteError, RepeatMode, StreamExtractor, StreamKind, Track};
use riff_playback::{
    AudioResolver, PlayOutcome, PlaybackConfig, PlaybackError, PlaybackStatus, Player, ResolverConfig,
    SourceMode, SurfaceEvent, SurfaceKind,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ===== Test Helpers =====

/// Extractor that answers after a per-identifier delay
#[derive(Default)]
struct DelayedExtractor {
    delays_ms: HashMap<String, u64>,
    failing: bool,
}

#[async_trait]
impl StreamExtractor for DelayedExtractor {
    async fn extract(&self, identifier: &str) -> Result<ExtractedStream, RemoteError> {
        let delay = self.delays_ms.get(identifier).copied().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        if self.failing {
            return Err(RemoteError::Unreachable("extractor offline".to_string()));
        }
        Ok(ExtractedStream {
            url: format!("https://streams.example.com/{identifier}.m4a"),
            kind: StreamKind::Direct,
        })
    }
}

#[derive(Default)]
struct RecordingHistory {
    plays: Mutex<Vec<String>>,
}

impl PlayHistory for RecordingHistory {
    fn record_play(&self, track: &Track) {
        self.plays.lock().unwrap().push(track.id.to_string());
    }
}

fn remote_track(id: &str) -> Track {
    Track::new(id, format!("Remote {id}"), format!("https://www.youtube.com/watch?v={id}"))
}

fn local_track(id: &str) -> Track {
    Track::new(id, format!("Local {id}"), format!("https://cdn.example.com/{id}.mp3"))
}

fn player_with(extractor: DelayedExtractor) -> Player {
    let resolver = AudioResolver::new(Arc::new(extractor), ResolverConfig::default());
    Player::new(PlaybackConfig::default(), resolver)
}

// ===== Resolution =====

#[tokio::test]
async fn local_reference_plays_directly() {
    let player = player_with(DelayedExtractor::default());
    let track = local_track("a");

    let outcome = player.request_play(track.clone(), vec![track.clone()]).await.unwrap();

    let PlayOutcome::Started(source) = outcome else {
        panic!("expected playback to start");
    };
    assert_eq!(source.url, track.source_ref);
    assert_eq!(source.mode, SourceMode::Direct);
    assert_eq!(player.snapshot().unwrap().status, PlaybackStatus::Playing);
}

#[tokio::test]
async fn extraction_failure_plays_embedded() {
    let player = player_with(DelayedExtractor {
        failing: true,
        ..DelayedExtractor::default()
    });

    let outcome = player.request_play(remote_track("abc"), Vec::new()).await.unwrap();

    assert!(matches!(outcome, PlayOutcome::Started(ref s) if s.mode == SourceMode::Embed));
    let state = player.snapshot().unwrap();
    assert_eq!(state.surface.unwrap().kind, SurfaceKind::Embedded);
    assert!(state.duration_estimated);
}

#[tokio::test]
async fn malformed_track_keeps_previous_playback() {
    let player = player_with(DelayedExtractor::default());
    let good = local_track("good");
    player.request_play(good.clone(), Vec::new()).await.unwrap();

    let err = player
        .request_play(Track::new("bad", "Bad", ""), Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PlaybackError::Resolution(_)));
    let state = player.snapshot().unwrap();
    assert_eq!(state.status, PlaybackStatus::Playing);
    assert_eq!(state.current_track.unwrap().id, good.id);
}

// ===== Rapid Input =====

#[tokio::test(start_paused = true)]
async fn last_request_wins_when_first_resolves_late() {
    let mut delays = HashMap::new();
    delays.insert("slow".to_string(), 300);
    delays.insert("fast".to_string(), 100);
    let player = player_with(DelayedExtractor {
        delays_ms: delays,
        failing: false,
    });

    let slow = remote_track("slow");
    let fast = remote_track("fast");
    let context = vec![slow.clone(), fast.clone()];

    let (first, second) = tokio::join!(
        player.request_play(slow.clone(), context.clone()),
        player.request_play(fast.clone(), context.clone()),
    );

    assert_eq!(first.unwrap(), PlayOutcome::Superseded);
    assert!(matches!(second.unwrap(), PlayOutcome::Started(_)));

    let state = player.snapshot().unwrap();
    assert_eq!(state.current_track.unwrap().id, fast.id);
    assert_eq!(state.current_index, Some(1));
    assert_eq!(state.status, PlaybackStatus::Playing);
}

#[tokio::test(start_paused = true)]
async fn snapshots_show_loading_while_resolving() {
    let mut delays = HashMap::new();
    delays.insert("slow".to_string(), 200);
    let player = Arc::new(player_with(DelayedExtractor {
        delays_ms: delays,
        failing: false,
    }));
    let mut rx = player.subscribe();

    let task = {
        let player = Arc::clone(&player);
        tokio::spawn(async move { player.request_play(remote_track("slow"), Vec::new()).await })
    };

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().status, PlaybackStatus::Loading);

    task.await.unwrap().unwrap();
    assert_eq!(player.snapshot().unwrap().status, PlaybackStatus::Playing);
    assert_eq!(rx.borrow().status, PlaybackStatus::Playing);
}

// ===== Queue Advance =====

#[tokio::test]
async fn next_and_previous_follow_queue() {
    let player = player_with(DelayedExtractor::default());
    let context = vec![local_track("a"), local_track("b"), local_track("c")];
    player.request_play(context[0].clone(), context.clone()).await.unwrap();

    assert_eq!(player.previous().await.unwrap(), PlayOutcome::Unchanged);

    player.next().await.unwrap();
    player.next().await.unwrap();
    assert_eq!(player.snapshot().unwrap().current_index, Some(2));

    assert_eq!(player.next().await.unwrap(), PlayOutcome::Unchanged);
    assert_eq!(player.snapshot().unwrap().current_index, Some(2));

    player.toggle_repeat().unwrap();
    player.toggle_repeat().unwrap();
    assert_eq!(player.snapshot().unwrap().repeat, RepeatMode::Playlist);
    player.next().await.unwrap();
    assert_eq!(player.snapshot().unwrap().current_track.unwrap().id.as_str(), "a");
}

#[tokio::test]
async fn ended_signal_advances_then_parks() {
    let player = player_with(DelayedExtractor::default());
    let context = vec![local_track("a"), local_track("b")];
    player.request_play(context[0].clone(), context.clone()).await.unwrap();

    let load_id = player.snapshot().unwrap().load_id.unwrap();
    let outcome = player.handle_surface_event(load_id, SurfaceEvent::Ended).await.unwrap();
    assert!(matches!(outcome, PlayOutcome::Started(_)));
    assert_eq!(player.snapshot().unwrap().current_track.unwrap().id.as_str(), "b");

    let load_id = player.snapshot().unwrap().load_id.unwrap();
    let outcome = player.handle_surface_event(load_id, SurfaceEvent::Ended).await.unwrap();
    assert_eq!(outcome, PlayOutcome::Unchanged);

    let state = player.snapshot().unwrap();
    assert_eq!(state.status, PlaybackStatus::Paused);
    assert_eq!(state.progress, 100.0);
}

#[tokio::test]
async fn repeat_track_replays_on_end() {
    let player = player_with(DelayedExtractor::default());
    let context = vec![local_track("a"), local_track("b")];
    player.request_play(context[0].clone(), context.clone()).await.unwrap();
    player.toggle_repeat().unwrap();

    let load_id = player.snapshot().unwrap().load_id.unwrap();
    player.handle_surface_event(load_id, SurfaceEvent::Ended).await.unwrap();

    let state = player.snapshot().unwrap();
    assert_eq!(state.current_track.unwrap().id.as_str(), "a");
    assert_ne!(state.load_id, Some(load_id));
    assert_eq!(state.status, PlaybackStatus::Playing);
}

// ===== History =====

#[tokio::test]
async fn successful_plays_are_recorded() {
    let history = Arc::new(RecordingHistory::default());
    let player = player_with(DelayedExtractor::default()).with_history(history.clone());

    player.request_play(local_track("a"), Vec::new()).await.unwrap();
    player.request_play(local_track("b"), Vec::new()).await.unwrap();
    let _ = player.request_play(Track::new("", "No id", "x"), Vec::new()).await;

    assert_eq!(*history.plays.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
}
