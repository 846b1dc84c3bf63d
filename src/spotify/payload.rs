//! Typed shapes for the Spotify payloads this dashboard consumes.
//!
//! Only the fields the views project are declared; everything else in the
//! provider's (much larger) objects is ignored. A response missing one of
//! these fields fails decoding with a typed error instead of surfacing as a
//! null dereference somewhere downstream.

use serde::Deserialize;

/// Track object as returned inside player responses.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackPayload {
    pub name: String,
    pub duration_ms: u64,
    pub popularity: u32,
    pub artists: Vec<ArtistPayload>,
    pub album: AlbumPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistPayload {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumPayload {
    pub images: Vec<ImagePayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImagePayload {
    pub url: String,
    pub width: u32,
}

/// Body of `/me/player/currently-playing` when something is playing.
///
/// The endpoint signals "nothing playing" with an empty body, which the
/// client layer maps to `None` before this shape is ever decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentlyPlayingPayload {
    pub item: TrackPayload,
    pub progress_ms: u64,
    pub is_playing: bool,
}

/// Body of `/me/player/recently-played`, most recent first.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentlyPlayedPayload {
    pub items: Vec<PlayHistoryPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayHistoryPayload {
    pub played_at: String,
    pub track: TrackPayload,
}
