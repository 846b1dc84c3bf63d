use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::Config;

use super::credentials::Credentials;
use super::error::AuthError;
use super::store::CredentialStore;

const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Refresh this many seconds before the recorded expiry, covering clock skew
/// and the latency of the data call the token is about to authorize.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Owns the credential record and the exchanges against the token endpoint.
///
/// All access goes through an async mutex: overlapping dashboard requests
/// serialize here, so two callers can never race a refresh against each
/// other or against the store.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use nowplayed::auth::{FileCredentialStore, TokenManager};
/// use nowplayed::config::Config;
///
/// let config = Config::from_env()?;
/// let store = Arc::new(FileCredentialStore::new(&config.credentials_path));
/// let manager = TokenManager::new(config.http_client()?, &config, store)?;
/// # Ok::<(), nowplayed::error::Error>(())
/// ```
pub struct TokenManager {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    token_url: String,
    store: Arc<dyn CredentialStore>,
    state: Mutex<Option<Credentials>>,
}

impl TokenManager {
    /// Build a manager seeded from whatever the store currently holds.
    ///
    /// A missing or unreadable record seeds the unauthenticated state; only
    /// real store I/O failures surface as errors.
    pub fn new(
        http: reqwest::Client,
        config: &Config,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, AuthError> {
        let initial = store.load()?;
        if initial.is_some() {
            debug!("seeded credentials from the store");
        }
        Ok(Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            store,
            state: Mutex::new(initial),
        })
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Exchange the authorization code handed back by Spotify's redirect.
    ///
    /// On success the full credential record is persisted and held in
    /// memory. A provider rejection surfaces the provider's description and
    /// leaves any previously stored state untouched.
    pub async fn exchange_code(&self, code: &str) -> Result<(), AuthError> {
        let grant = self
            .request_token(
                &[
                    ("grant_type", "authorization_code"),
                    ("code", code),
                    ("redirect_uri", &self.redirect_uri),
                ],
                AuthError::ExchangeRejected,
            )
            .await?;
        // This grant type always carries a refresh token.
        let refresh_token = grant.refresh_token.ok_or_else(|| {
            AuthError::InvalidResponse("authorization code grant missing refresh_token".to_string())
        })?;
        let credentials = Credentials {
            access_token: grant.access_token,
            expires_at: grant.expires_at,
            refresh_token,
        };

        let mut state = self.state.lock().await;
        self.store.save(&credentials)?;
        *state = Some(credentials);
        info!("authorization code exchanged; dashboard is linked");
        Ok(())
    }

    /// Return an access token that is good for at least the expiry margin.
    ///
    /// Refreshes first when the stored token is at or inside the margin;
    /// one refresh attempt, no retries. `NotAuthenticated` means the user
    /// has to go through the login flow.
    pub async fn valid_access_token(&self) -> Result<String, AuthError> {
        let mut state = self.state.lock().await;
        let credentials = state.as_mut().ok_or(AuthError::NotAuthenticated)?;

        if within_expiry_margin(credentials.expires_at, Utc::now()) {
            debug!("access token at or inside the expiry margin; refreshing");
            let form = [
                ("grant_type", "refresh_token"),
                ("refresh_token", credentials.refresh_token.as_str()),
            ];
            let grant = self
                .request_token(&form, AuthError::RefreshRejected)
                .await?;

            credentials.access_token = grant.access_token;
            credentials.expires_at = grant.expires_at;
            // Rotation is optional: never replace a live refresh token with
            // absence.
            if let Some(rotated) = grant.refresh_token {
                credentials.refresh_token = rotated;
            }
            self.store.save(credentials)?;
            info!("access token refreshed");
        }

        Ok(credentials.access_token.clone())
    }

    /// POST against the token endpoint with HTTP Basic client credentials.
    ///
    /// `rejected` picks the error variant when the provider reports an
    /// `error` field instead of a grant.
    async fn request_token(
        &self,
        form: &[(&str, &str)],
        rejected: fn(String) -> AuthError,
    ) -> Result<TokenGrant, AuthError> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(form)
            .send()
            .await?;
        let payload: TokenEndpointResponse = response.json().await?;

        if let Some(error) = payload.error {
            let description = payload.error_description.unwrap_or(error);
            return Err(rejected(description));
        }
        let access_token = payload.access_token.ok_or_else(|| {
            AuthError::InvalidResponse("token response missing access_token".to_string())
        })?;
        let expires_in = payload.expires_in.ok_or_else(|| {
            AuthError::InvalidResponse("token response missing expires_in".to_string())
        })?;

        Ok(TokenGrant {
            access_token,
            expires_at: Utc::now() + Duration::seconds(expires_in),
            refresh_token: payload.refresh_token,
        })
    }
}

/// A successful token-endpoint grant, expiry already made absolute.
struct TokenGrant {
    access_token: String,
    expires_at: DateTime<Utc>,
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
    refresh_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

fn within_expiry_margin(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expires_at - now <= Duration::seconds(EXPIRY_MARGIN_SECS)
}
