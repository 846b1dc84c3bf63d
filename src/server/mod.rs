//! The dashboard's HTTP surface: `/data` for the frontend poll loop,
//! `/login` for the OAuth consent round trip.

mod error;
mod handlers;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use reqwest::Url;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::TokenManager;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::spotify::SpotifyClient;

pub use error::DataError;

const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
const SCOPES: &str = "user-read-recently-played user-read-currently-playing";

/// Shared state behind the handlers.
#[derive(Clone)]
pub struct AppState {
    client: Arc<SpotifyClient>,
    manager: Arc<TokenManager>,
    authorize_url: String,
}

impl AppState {
    /// Wire up the handler state, precomputing the consent URL the login
    /// page points at.
    pub fn new(
        config: &Config,
        client: Arc<SpotifyClient>,
        manager: Arc<TokenManager>,
    ) -> Result<Self> {
        let authorize_url = authorize_url(config)?;
        Ok(Self {
            client,
            manager,
            authorize_url,
        })
    }
}

fn authorize_url(config: &Config) -> Result<String> {
    let mut url = Url::parse(AUTHORIZE_URL)
        .map_err(|err| Error::Configuration(format!("authorize URL: {err}")))?;
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", &config.client_id)
        .append_pair("scope", SCOPES)
        .append_pair("redirect_uri", &config.redirect_uri);
    Ok(url.into())
}

/// The two dashboard routes plus request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/data", get(handlers::data))
        .route("/login", get(handlers::login))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("dashboard listening on http://{addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
