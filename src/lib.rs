//! Nowplayed — a personal Spotify dashboard.
//!
//! Serves a small JSON API over the Spotify Web API: what is playing right
//! now and what played recently, behind an OAuth2 authorization-code login
//! whose tokens are persisted and refreshed transparently.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use nowplayed::auth::{FileCredentialStore, TokenManager};
//! use nowplayed::config::Config;
//! use nowplayed::server::{self, AppState};
//! use nowplayed::spotify::SpotifyClient;
//!
//! # async fn example() -> nowplayed::error::Result<()> {
//! let config = Config::from_env()?;
//! let http = config.http_client()?;
//!
//! let store = Arc::new(FileCredentialStore::new(&config.credentials_path));
//! let manager = Arc::new(TokenManager::new(http.clone(), &config, store)?);
//! let client = Arc::new(SpotifyClient::new(http, manager.clone()));
//!
//! let state = AppState::new(&config, client, manager)?;
//! server::serve(&config, state).await
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod server;
pub mod spotify;
