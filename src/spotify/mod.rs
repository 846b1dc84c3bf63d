//! Spotify Web API client and the dashboard projections of its payloads.

pub mod client;
pub mod error;
pub mod payload;
pub mod view;

pub use client::SpotifyClient;
pub use error::ApiError;
pub use view::{CurrentlyPlaying, RecentlyPlayedEntry, Track};
