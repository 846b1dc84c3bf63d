//! Dashboard server binary entry point.

use std::sync::Arc;

use nowplayed::auth::{FileCredentialStore, TokenManager};
use nowplayed::config::Config;
use nowplayed::server::{self, AppState};
use nowplayed::spotify::SpotifyClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("nowplayed=info,tower_http=info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> nowplayed::error::Result<()> {
    let config = Config::from_env()?;
    let http = config.http_client()?;

    let store = Arc::new(FileCredentialStore::new(&config.credentials_path));
    let manager = Arc::new(TokenManager::new(http.clone(), &config, store)?);
    let client = Arc::new(SpotifyClient::new(http, manager.clone()));

    let state = AppState::new(&config, client, manager)?;
    server::serve(&config, state).await
}
