use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

use crate::auth::AuthError;
use crate::spotify::ApiError;

/// A failed dashboard data fetch, mapped onto the HTTP surface.
///
/// Token problems answer 401 so the frontend can send the user to `/login`,
/// a provider rate limit keeps its Retry-After, and everything else is a
/// 502 since the dashboard itself is healthy but Spotify was not.
pub struct DataError(pub ApiError);

impl From<ApiError> for DataError {
    fn from(error: ApiError) -> Self {
        Self(error)
    }
}

impl IntoResponse for DataError {
    fn into_response(self) -> Response {
        match self.0 {
            error @ (ApiError::Auth(AuthError::NotAuthenticated)
            | ApiError::Auth(AuthError::RefreshRejected(_))
            | ApiError::TokenInvalid) => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": error.to_string() })),
            )
                .into_response(),
            ApiError::RateLimited { retry_after_secs } => {
                let body = Json(json!({ "error": "rate limited by Spotify" }));
                match retry_after_secs {
                    Some(secs) => (
                        StatusCode::TOO_MANY_REQUESTS,
                        [(header::RETRY_AFTER, secs.to_string())],
                        body,
                    )
                        .into_response(),
                    None => (StatusCode::TOO_MANY_REQUESTS, body).into_response(),
                }
            }
            error => {
                warn!(%error, "spotify call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": error.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
