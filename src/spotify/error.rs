use thiserror::Error;

use crate::auth::AuthError;

/// Errors from authenticated calls against the Spotify Web API.
///
/// Non-success statuses are classified rather than passed through as raw
/// bytes: a 401 means the token is no longer good (re-authenticate), a 429
/// carries the provider's Retry-After when it sent one, and anything else
/// keeps its status and body for the caller to surface.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("access token rejected by the API; re-authentication required")]
    TokenInvalid,
    #[error("rate limited by the API")]
    RateLimited { retry_after_secs: Option<u64> },
    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed API payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}
