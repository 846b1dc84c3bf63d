use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::spotify::ApiError;

use super::error::DataError;
use super::AppState;

const DEFAULT_HISTORY_LIMIT: u32 = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuery {
    request: Option<String>,
    history_limit: Option<String>,
}

/// `GET /data`: the JSON payload the frontend polls.
///
/// `request` names the wanted sections (`currentlyPlaying`,
/// `recentlyPlayed`); leaving it out means both. `historyLimit` caps the
/// history length, falling back to 10 when absent or not a positive number.
pub async fn data(
    State(state): State<AppState>,
    Query(query): Query<DataQuery>,
) -> Result<Json<Value>, DataError> {
    let sections = RequestedSections::parse(query.request.as_deref());
    let mut body = Map::new();

    if sections.currently_playing {
        let playing = state.client.currently_playing().await?;
        body.insert("currentlyPlaying".to_string(), to_value(playing)?);
    }
    if sections.recently_played {
        let limit = parse_history_limit(query.history_limit.as_deref());
        let entries = state.client.recently_played(limit).await?;
        body.insert("recentlyPlayed".to_string(), to_value(entries)?);
    }

    Ok(Json(Value::Object(body)))
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    code: Option<String>,
}

/// `GET /login`: without a code, a page linking to Spotify's consent
/// screen; with one, the server-side tail of the authorization-code flow.
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Result<Html<String>, (StatusCode, String)> {
    match query.code {
        Some(code) => match state.manager.exchange_code(&code).await {
            Ok(()) => Ok(Html("Successfully linked!".to_string())),
            Err(error) => {
                info!(%error, "authorization code exchange failed");
                Err((StatusCode::BAD_REQUEST, error.to_string()))
            }
        },
        None => Ok(Html(login_page(&state.authorize_url))),
    }
}

fn login_page(authorize_url: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<body>\n    <a href=\"{authorize_url}\">Login with Spotify</a>\n</body>\n</html>\n"
    )
}

fn to_value(view: impl serde::Serialize) -> Result<Value, DataError> {
    serde_json::to_value(view).map_err(|err| DataError(ApiError::Decode(err.to_string())))
}

/// Which sections of the data payload the caller asked for.
#[derive(Debug, PartialEq, Eq)]
struct RequestedSections {
    currently_playing: bool,
    recently_played: bool,
}

impl RequestedSections {
    /// No `request` parameter means everything; an explicit list means
    /// exactly the named sections, so an empty list selects none.
    fn parse(request: Option<&str>) -> Self {
        let Some(raw) = request else {
            return Self {
                currently_playing: true,
                recently_played: true,
            };
        };
        let mut sections = Self {
            currently_playing: false,
            recently_played: false,
        };
        for name in raw
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|name| !name.is_empty())
        {
            match name {
                "currentlyPlaying" => sections.currently_playing = true,
                "recentlyPlayed" => sections.recently_played = true,
                _ => {}
            }
        }
        sections
    }
}

/// Absent, unparseable, and non-positive values all mean the default.
fn parse_history_limit(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
}
