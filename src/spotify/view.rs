//! Projections from raw Spotify payloads into the dashboard's view objects.
//!
//! Pure functions, no I/O. Views are flat, owned, and stable-shaped; they
//! keep no reference to the payload they came from.

use serde::Serialize;

use super::payload::{CurrentlyPlayingPayload, ImagePayload, RecentlyPlayedPayload, TrackPayload};

/// Simplified track: display names only, plus the largest album artwork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    pub name: String,
    pub artists: Vec<String>,
    pub popularity: u32,
    /// URL of the widest album image; `None` when the album has no images.
    pub image: Option<String>,
}

/// What is playing right now.
///
/// Progress is passed through as reported; the provider does not guarantee
/// `current_progress_ms <= song_duration_ms` and neither does this view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentlyPlaying {
    pub track: Track,
    pub song_duration_ms: u64,
    pub current_progress_ms: u64,
    pub is_playing: bool,
}

/// One entry of the listening history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentlyPlayedEntry {
    /// Provider's ISO-8601 timestamp, verbatim.
    pub played_at: String,
    pub track: Track,
}

/// Project a raw track: artist display names in source order, widest image.
pub fn project_track(payload: TrackPayload) -> Track {
    let image = widest_image(payload.album.images);
    Track {
        name: payload.name,
        artists: payload.artists.into_iter().map(|a| a.name).collect(),
        popularity: payload.popularity,
        image,
    }
}

/// Project the currently-playing payload; an absent payload (nothing
/// playing) projects to an absent view.
pub fn project_currently_playing(
    payload: Option<CurrentlyPlayingPayload>,
) -> Option<CurrentlyPlaying> {
    let payload = payload?;
    let song_duration_ms = payload.item.duration_ms;
    Some(CurrentlyPlaying {
        track: project_track(payload.item),
        song_duration_ms,
        current_progress_ms: payload.progress_ms,
        is_playing: payload.is_playing,
    })
}

/// Project the listening history, preserving the provider's ordering
/// (most recent first).
pub fn project_recently_played(payload: RecentlyPlayedPayload) -> Vec<RecentlyPlayedEntry> {
    payload
        .items
        .into_iter()
        .map(|entry| RecentlyPlayedEntry {
            played_at: entry.played_at,
            track: project_track(entry.track),
        })
        .collect()
}

/// Strictly-widest image wins; the first one encountered keeps a tie.
fn widest_image(images: Vec<ImagePayload>) -> Option<String> {
    let mut best_url = None;
    let mut best_width = 0;
    for image in images {
        if image.width > best_width {
            best_width = image.width;
            best_url = Some(image.url);
        }
    }
    best_url
}
