use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OAuth credential record for the single dashboard user.
///
/// Either a complete record exists (authenticated) or none does; a partially
/// populated record is not representable. The serialized form matches the
/// on-disk layout: `{"accessToken", "expirationDate", "refreshToken"}`, with
/// the expiry stored as Unix seconds.
///
/// # Example
/// ```no_run
/// use nowplayed::auth::Credentials;
/// use chrono::{Duration, Utc};
///
/// let credentials = Credentials {
///     access_token: "access".to_string(),
///     expires_at: Utc::now() + Duration::hours(1),
///     refresh_token: "refresh".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub access_token: String,
    #[serde(rename = "expirationDate", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
    pub refresh_token: String,
}
