use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use super::credentials::Credentials;
use super::error::AuthError;

/// Storage abstraction for the persisted credential record.
///
/// One logical user, one record; `save` replaces whatever was stored before.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<Credentials>, AuthError>;
    fn save(&self, credentials: &Credentials) -> Result<(), AuthError>;
}

/// File-backed credential store using a single JSON document.
///
/// A missing file is the normal first-run state and loads as `None`. A file
/// that cannot be parsed as a complete record also loads as `None` (with a
/// warning) so that corrupted state degrades to "please log in again" rather
/// than taking the dashboard down.
///
/// # Example
/// ```no_run
/// use nowplayed::auth::{Credentials, CredentialStore, FileCredentialStore};
/// use chrono::{Duration, Utc};
///
/// let store = FileCredentialStore::new("data/credentials.json");
/// let credentials = Credentials {
///     access_token: "access".to_string(),
///     expires_at: Utc::now() + Duration::hours(1),
///     refresh_token: "refresh".to_string(),
/// };
/// store.save(&credentials)?;
/// # Ok::<(), nowplayed::auth::AuthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, AuthError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AuthError::Io(err.to_string())),
        };
        match serde_json::from_str::<Credentials>(&raw) {
            Ok(credentials) => Ok(Some(credentials)),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    "stored credentials are unreadable ({err}); treating as logged out"
                );
                Ok(None)
            }
        }
    }

    fn save(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let serialized = serde_json::to_vec_pretty(credentials)?;
        atomic_write(&self.path, &serialized)
    }
}

/// Write the record through a temp file + rename so a reader never observes
/// a half-written document.
fn atomic_write(path: &Path, data: &[u8]) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| AuthError::Io(format!("{} has no file name", path.display())))?;

    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let temp_name = format!(
        ".{}.tmp-{}-{nonce}",
        file_name.to_string_lossy(),
        std::process::id()
    );
    let temp_path = path.with_file_name(temp_name);

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let write_result = (|| -> std::io::Result<()> {
        let mut temp_file = options.open(&temp_path)?;
        temp_file.write_all(data)?;
        temp_file.sync_all()?;
        Ok(())
    })();

    if let Err(err) = write_result {
        let _ = fs::remove_file(&temp_path);
        return Err(AuthError::Io(err.to_string()));
    }

    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(AuthError::Io(err.to_string()));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Timelike, Utc};
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, FileCredentialStore) {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        (dir, store)
    }

    fn credentials() -> Credentials {
        Credentials {
            access_token: "access".to_string(),
            // The file stores whole seconds; keep the fixture representable.
            expires_at: (Utc::now() + Duration::hours(1)).with_nanosecond(0).unwrap(),
            refresh_token: "refresh".to_string(),
        }
    }

    #[test]
    fn round_trip_preserves_record() {
        let (_dir, store) = temp_store();
        let saved = credentials();
        store.save(&saved).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn missing_file_loads_as_none() {
        let (_dir, store) = temp_store();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_file_loads_as_none() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "{not-json").unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn incomplete_record_loads_as_none() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), r#"{"accessToken": "only-this"}"#).unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_uses_expected_file_layout() {
        let (_dir, store) = temp_store();
        store.save(&credentials()).unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["accessToken"], "access");
        assert_eq!(json["refreshToken"], "refresh");
        assert!(json["expirationDate"].is_i64());
    }

    #[test]
    fn save_overwrites_previous_record() {
        let (_dir, store) = temp_store();
        store.save(&credentials()).unwrap();
        let replacement = Credentials {
            access_token: "second".to_string(),
            ..credentials()
        };
        store.save(&replacement).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.access_token, "second");
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested/dir/credentials.json"));
        store.save(&credentials()).unwrap();
        assert!(store.load().unwrap().is_some());
    }

    #[test]
    fn save_does_not_leave_temp_files() {
        let (dir, store) = temp_store();
        store.save(&credentials()).unwrap();
        let has_tmp = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .any(|name| name.contains(".tmp-"));
        assert!(!has_tmp);
    }

    #[cfg(unix)]
    #[test]
    fn save_sets_unix_permissions_to_0600() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, store) = temp_store();
        store.save(&credentials()).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }
}
