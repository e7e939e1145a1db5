/// Riff Player - command-line front-end
use clap::{Parser, Subcommand};
use riff_core::{format_duration, Track};
use riff_discovery::SearchOutcome;
use riff_player::{AppError, PlayerConfig, PlayerSession};
use riff_playback::PlayOutcome;
use riff_storage::LibraryStore;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "riff-player")]
#[command(about = "Riff music player", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./riff.toml when present)
    #[arg(short, long, global = true, env = "RIFF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog, or the remote index with --remote
    Search {
        /// Search query
        query: String,
        /// Query the remote index instead of the local catalog
        #[arg(short, long)]
        remote: bool,
    },
    /// List trending remote tracks
    Trending,
    /// List genres, or the tracks of one genre
    Genres {
        /// Genre to list tracks for
        genre: Option<String>,
    },
    /// Resolve a track to a playable source
    Resolve {
        /// Track ID
        track_id: String,
    },
    /// Start playing a track and print the resulting player state
    Play {
        /// Track ID
        track_id: String,
    },
    /// Like a track
    Like {
        /// Track ID
        track_id: String,
    },
    /// Unlike a track
    Unlike {
        /// Track ID
        track_id: String,
    },
    /// List liked tracks
    Liked,
    /// List recently played tracks
    Recent,
    /// Manage playlists
    #[command(subcommand)]
    Playlist(PlaylistCommands),
}

#[derive(Subcommand)]
enum PlaylistCommands {
    /// Create a playlist
    Create {
        /// Playlist name
        name: String,
        /// Playlist description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Add a track to a playlist
    Add { playlist_id: String, track_id: String },
    /// Remove a track from a playlist
    Remove { playlist_id: String, track_id: String },
    /// Delete a playlist
    Delete { playlist_id: String },
    /// List playlists
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "riff_player=info,riff_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = PlayerConfig::load(cli.config.as_deref())?;
    let session = PlayerSession::init(config)?;

    let result = run(&session, cli.command).await;
    session.shutdown()?;
    result
}

async fn run(session: &PlayerSession, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Search { query, remote } => {
            let tracks = if remote {
                match session.search().remote_search(&query).await? {
                    SearchOutcome::Applied(tracks) => tracks,
                    SearchOutcome::Superseded => Vec::new(),
                }
            } else {
                session.search().local_search(&query)
            };
            print_tracks(&tracks);
        }
        Commands::Trending => {
            let server = session.server().ok_or(AppError::RemoteUnavailable)?;
            let max = session.config().search.max_results;
            print_tracks(&server.search().trending(max).await?);
        }
        Commands::Genres { genre: Some(genre) } => {
            print_tracks(&session.search().browse_genre(&genre));
        }
        Commands::Genres { genre: None } => {
            for genre in session.search().genres() {
                println!("{:<16} {}", genre.name, genre.count);
            }
        }
        Commands::Resolve { track_id } => {
            let track = session.find_track(&track_id)?;
            let source = session.player().resolver().resolve(&track).await?;
            println!("{}", serde_json::to_string_pretty(&source)?);
        }
        Commands::Play { track_id } => {
            play(session, &track_id).await?;
        }
        Commands::Like { track_id } => {
            let track = session.find_track(&track_id)?;
            if session.library().like_track(track)? {
                println!("Liked {}", track_id);
            } else {
                println!("{} is already liked", track_id);
            }
        }
        Commands::Unlike { track_id } => {
            let id = riff_core::TrackId::new(track_id.as_str());
            if session.library().unlike_track(&id)? {
                println!("Unliked {}", track_id);
            } else {
                println!("{} was not liked", track_id);
            }
        }
        Commands::Liked => print_tracks(&session.library().liked_tracks()?),
        Commands::Recent => print_tracks(&session.library().recently_played()?),
        Commands::Playlist(command) => playlist(session, command)?,
    }

    Ok(())
}

async fn play(session: &PlayerSession, track_id: &str) -> anyhow::Result<()> {
    let track = session.find_track(track_id)?;

    // Catalog tracks play with the catalog as their queue
    let context = if session.catalog().get(&track.id).is_some() {
        session.catalog().all().to_vec()
    } else {
        vec![track.clone()]
    };

    match session.player().request_play(track, context).await? {
        PlayOutcome::Started(source) => {
            if let Some(warning) = &source.warning {
                eprintln!("warning: {}", warning);
            }
        }
        PlayOutcome::Superseded | PlayOutcome::Unchanged => {}
    }

    let snapshot = session.player().snapshot()?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    for event in session.player().drain_events()? {
        tracing::debug!(event = ?event, "Playback event");
    }
    Ok(())
}

fn playlist(session: &PlayerSession, command: PlaylistCommands) -> anyhow::Result<()> {
    let library: &LibraryStore = session.library();

    match command {
        PlaylistCommands::Create { name, description } => {
            let playlist = library.create_playlist(&name, &description)?;
            println!("Created playlist {} ({})", playlist.name, playlist.id);
        }
        PlaylistCommands::Add {
            playlist_id,
            track_id,
        } => {
            let track = session.find_track(&track_id)?;
            let id = riff_core::PlaylistId::new(playlist_id);
            if library.add_track_to_playlist(&id, track)? {
                println!("Added {} to {}", track_id, id);
            } else {
                println!("{} is already in {}", track_id, id);
            }
        }
        PlaylistCommands::Remove {
            playlist_id,
            track_id,
        } => {
            let id = riff_core::PlaylistId::new(playlist_id);
            let track_id = riff_core::TrackId::new(track_id);
            if library.remove_track_from_playlist(&id, &track_id)? {
                println!("Removed {} from {}", track_id, id);
            } else {
                println!("{} is not in {}", track_id, id);
            }
        }
        PlaylistCommands::Delete { playlist_id } => {
            let id = riff_core::PlaylistId::new(playlist_id);
            if library.delete_playlist(&id)? {
                println!("Deleted {}", id);
            } else {
                println!("No playlist {}", id);
            }
        }
        PlaylistCommands::List => {
            for playlist in library.playlists()? {
                println!(
                    "{}  {:<24} {} tracks",
                    playlist.id,
                    playlist.name,
                    playlist.tracks.len()
                );
            }
        }
    }

    Ok(())
}

fn print_tracks(tracks: &[Track]) {
    if tracks.is_empty() {
        println!("No tracks");
        return;
    }

    for track in tracks {
        println!(
            "{:<12} {:<32} {:<24} {:>6}",
            track.id.as_str(),
            track.title,
            track.artist,
            format_duration(f64::from(track.duration))
        );
    }
}
