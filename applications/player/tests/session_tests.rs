//! Session wiring tests: a full player session over a temporary data
//! directory, with no backend configured.

use riff_core::TrackId;
use riff_player::{AppError, PlayerConfig, PlayerSession};
use riff_playback::{PlayOutcome, PlaybackStatus, SourceMode};
use std::path::Path;
use tempfile::TempDir;

fn offline_config(data_dir: &Path) -> PlayerConfig {
    let mut config = PlayerConfig::default();
    config.storage.data_dir = data_dir.to_path_buf();
    config
}

fn session_in(dir: &TempDir) -> PlayerSession {
    PlayerSession::init(offline_config(dir.path())).unwrap()
}

#[test]
fn init_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let mut config = offline_config(dir.path());
    config.playback.volume = 3.0;

    assert!(matches!(
        PlayerSession::init(config),
        Err(AppError::Config(_))
    ));
}

#[test]
fn offline_session_uses_sample_catalog() {
    let dir = TempDir::new().unwrap();
    let session = session_in(&dir);

    assert!(session.server().is_none());
    assert_eq!(session.catalog().len(), 8);
    assert!(!session.search().local_search("synthwave").is_empty());
}

#[test]
fn custom_catalog_is_loaded_from_path() {
    let dir = TempDir::new().unwrap();
    let catalog_path = dir.path().join("catalog.json");
    std::fs::write(
        &catalog_path,
        r#"[{ "id": "x1", "title": "Only Track", "sourceRef": "https://cdn.example.com/x1.mp3" }]"#,
    )
    .unwrap();

    let mut config = offline_config(&dir.path().join("data"));
    config.catalog.path = Some(catalog_path);
    let session = PlayerSession::init(config).unwrap();

    assert_eq!(session.catalog().len(), 1);
    assert_eq!(session.find_track("x1").unwrap().title, "Only Track");
}

#[test]
fn unknown_track_is_not_found() {
    let dir = TempDir::new().unwrap();
    let session = session_in(&dir);

    assert!(matches!(
        session.find_track("nope"),
        Err(AppError::TrackNotFound(_))
    ));
}

#[tokio::test]
async fn play_records_history_and_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let session = session_in(&dir);
        let track = session.find_track("2").unwrap();
        let context = session.catalog().all().to_vec();

        let outcome = session.player().request_play(track, context).await.unwrap();
        assert!(matches!(outcome, PlayOutcome::Started(_)));

        let state = session.player().snapshot().unwrap();
        assert_eq!(state.status, PlaybackStatus::Playing);
        assert_eq!(state.current_index, Some(1));
        assert_eq!(state.queue.len(), 8);

        session.shutdown().unwrap();
    }

    let session = session_in(&dir);
    let recent = session.library().recently_played().unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, TrackId::new("2"));

    // Known through the library even though it is also in the catalog
    assert_eq!(session.find_track("2").unwrap().id, TrackId::new("2"));
}

#[tokio::test]
async fn provider_track_without_backend_falls_back_to_embed() {
    let dir = TempDir::new().unwrap();
    let session = session_in(&dir);
    let track = session.find_track("8").unwrap();

    let source = session.player().resolver().resolve(&track).await.unwrap();
    assert_eq!(source.mode, SourceMode::Embed);
    assert_eq!(source.identifier.as_deref(), Some("MV_3Dpw-BRY"));
    assert!(source.is_degraded());
}

#[test]
fn likes_and_playlists_persist() {
    let dir = TempDir::new().unwrap();

    let playlist_id = {
        let session = session_in(&dir);
        let track = session.find_track("5").unwrap();

        assert!(session.library().like_track(track.clone()).unwrap());
        let playlist = session.library().create_playlist("Evening", "").unwrap();
        session
            .library()
            .add_track_to_playlist(&playlist.id, track)
            .unwrap();
        playlist.id
    };

    let session = session_in(&dir);
    assert!(session.library().is_liked(&TrackId::new("5")).unwrap());

    let playlist = session.library().playlist(&playlist_id).unwrap().unwrap();
    assert_eq!(playlist.name, "Evening");
    assert_eq!(playlist.tracks.len(), 1);
}

#[tokio::test]
async fn remote_search_without_backend_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let mut config = offline_config(dir.path());
    config.search.debounce_ms = 0;
    let session = PlayerSession::init(config).unwrap();

    assert!(session.search().remote_search("anything").await.is_err());
}

#[tokio::test]
async fn unusable_data_dir_falls_back_to_memory() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "plain file").unwrap();

    let session = PlayerSession::init(offline_config(&blocker.join("sub"))).unwrap();

    let track = session.find_track("1").unwrap();
    assert!(session.library().like_track(track.clone()).unwrap());
    assert!(session.library().is_liked(&track.id).unwrap());

    let outcome = session
        .player()
        .request_play(track, session.catalog().all().to_vec())
        .await
        .unwrap();
    assert!(matches!(outcome, PlayOutcome::Started(_)));
    assert_eq!(session.library().recently_played().unwrap().len(), 1);
}
