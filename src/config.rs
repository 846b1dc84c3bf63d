//! Process configuration (environment variables, `.env` honored).

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

const DEFAULT_CREDENTIALS_PATH: &str = "data/credentials.json";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration for the dashboard.
///
/// The Spotify application credentials are required; everything else falls
/// back to a default suitable for running next to a local frontend.
///
/// # Example
/// ```no_run
/// use nowplayed::config::Config;
///
/// let config = Config::from_env()?;
/// println!("serving on {}:{}", config.bind_address, config.port);
/// # Ok::<(), nowplayed::error::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Spotify application client id.
    pub client_id: String,
    /// Spotify application client secret.
    pub client_secret: String,
    /// Redirect URI registered with Spotify for the authorization-code flow.
    pub redirect_uri: String,
    /// Where the credential record is persisted between runs.
    pub credentials_path: PathBuf,
    /// Address the HTTP surface binds to.
    pub bind_address: String,
    /// Port the HTTP surface binds to.
    pub port: u16,
    /// Connect/read timeout for outbound Spotify calls.
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Reads a `.env` file first when one is present. Required variables:
    /// `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET`, `SPOTIFY_REDIRECT_URI`.
    /// Optional: `NOWPLAYED_CREDENTIALS_PATH`, `NOWPLAYED_BIND_ADDRESS`,
    /// `NOWPLAYED_PORT`, `NOWPLAYED_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let client_id = require_var("SPOTIFY_CLIENT_ID")?;
        let client_secret = require_var("SPOTIFY_CLIENT_SECRET")?;
        let redirect_uri = require_var("SPOTIFY_REDIRECT_URI")?;

        let credentials_path = std::env::var("NOWPLAYED_CREDENTIALS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CREDENTIALS_PATH));

        let bind_address = std::env::var("NOWPLAYED_BIND_ADDRESS")
            .ok()
            .filter(|addr| !addr.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let port = match std::env::var("NOWPLAYED_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                Error::Configuration(format!("NOWPLAYED_PORT is not a valid port: {raw}"))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let http_timeout = match std::env::var("NOWPLAYED_HTTP_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| {
                    Error::Configuration(format!(
                        "NOWPLAYED_HTTP_TIMEOUT_SECS is not a valid number of seconds: {raw}"
                    ))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri,
            credentials_path,
            bind_address,
            port,
            http_timeout,
        })
    }

    /// Build the outbound HTTP client with the configured timeout.
    ///
    /// The dashboard serves an interactive UI, so a short bound beats
    /// waiting on the transport default.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .timeout(self.http_timeout)
            .build()?;
        Ok(client)
    }
}

fn require_var(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| Error::Configuration(format!("environment variable {name} is not set")))
}
