use thiserror::Error;

/// Errors from the token lifecycle: store I/O and token-endpoint exchanges.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated; visit /login to link a Spotify account")]
    NotAuthenticated,
    #[error("authorization code exchange rejected: {0}")]
    ExchangeRejected(String),
    #[error("token refresh rejected: {0}")]
    RefreshRejected(String),
    #[error("invalid token endpoint response: {0}")]
    InvalidResponse(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<std::io::Error> for AuthError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}
