//! Authenticated REST client for the Spotify Web API.

use std::sync::Arc;

use reqwest::header::RETRY_AFTER;
use reqwest::{Method, StatusCode, Url};
use tracing::debug;

use crate::auth::TokenManager;

use super::error::ApiError;
use super::payload::{CurrentlyPlayingPayload, RecentlyPlayedPayload};
use super::view::{
    project_currently_playing, project_recently_played, CurrentlyPlaying, RecentlyPlayedEntry,
};

const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Issues bearer-authenticated calls, asking the token manager for a valid
/// access token first; a call may therefore block on a refresh round trip.
pub struct SpotifyClient {
    http: reqwest::Client,
    manager: Arc<TokenManager>,
    base_url: String,
}

impl SpotifyClient {
    pub fn new(http: reqwest::Client, manager: Arc<TokenManager>) -> Self {
        Self {
            http,
            manager,
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Raw API call: appends the query pairs in order, attaches the bearer
    /// token, and returns the body of a successful response.
    ///
    /// Non-success statuses come back classified: 401 as
    /// [`ApiError::TokenInvalid`], 429 as [`ApiError::RateLimited`], the
    /// rest as [`ApiError::Status`].
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<u8>, ApiError> {
        let token = self.manager.valid_access_token().await?;
        let url = endpoint_url(&format!("{}{}", self.base_url, path), query)?;
        debug!(url = %url, "spotify api request");

        let response = self
            .http
            .request(method, url)
            .bearer_auth(&token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after_secs = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok());
            let body = response.text().await?;
            debug!(status = status.as_u16(), "spotify api request failed");
            return Err(match status {
                StatusCode::UNAUTHORIZED => ApiError::TokenInvalid,
                StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited { retry_after_secs },
                _ => ApiError::Status {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// What is playing right now; `None` when nothing is (the endpoint
    /// answers that with an empty body or a JSON null).
    pub async fn currently_playing(&self) -> Result<Option<CurrentlyPlaying>, ApiError> {
        let body = self
            .call(Method::GET, "/me/player/currently-playing", &[])
            .await?;
        if body.is_empty() {
            return Ok(None);
        }
        let payload: Option<CurrentlyPlayingPayload> =
            serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(project_currently_playing(payload))
    }

    /// The listening history, most recent first, capped at `limit` entries.
    pub async fn recently_played(&self, limit: u32) -> Result<Vec<RecentlyPlayedEntry>, ApiError> {
        let body = self
            .call(
                Method::GET,
                "/me/player/recently-played",
                &[("limit", limit.to_string())],
            )
            .await?;
        let payload: RecentlyPlayedPayload =
            serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(project_recently_played(payload))
    }
}

/// Build the request URL, percent-encoding each key and value and keeping
/// the pairs in insertion order. No pairs means no `?` at all.
fn endpoint_url(endpoint: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
    let mut url = Url::parse(endpoint)
        .map_err(|err| ApiError::InvalidUrl(format!("{endpoint}: {err}")))?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}
