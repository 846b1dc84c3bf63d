//! Error types for nowplayed.

use thiserror::Error;

use crate::auth::AuthError;
use crate::spotify::ApiError;

/// Primary error type for startup and serving-layer operations.
///
/// Request-scoped failures stay typed as [`AuthError`] / [`ApiError`]; this
/// type wraps them where a single error channel is needed (configuration
/// loading, binary entry point).
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, Error>;
