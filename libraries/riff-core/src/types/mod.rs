mod ids;
mod playlist;
mod recent;
mod repeat;
mod track;
mod user_data;

pub use ids::{PlaylistId, TrackId};
pub use playlist::Playlist;
pub use recent::{RecentlyPlayed, RECENTLY_PLAYED_CAPACITY};
pub use repeat::RepeatMode;
pub use track::Track;
pub use user_data::UserData;
