#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use nowplayed::auth::{AuthError, CredentialStore, Credentials};
use nowplayed::config::Config;

/// The HTTP Basic value for the test client id/secret pair in [`config`].
pub const BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";

#[derive(Default)]
pub struct InMemoryCredentialStore {
    record: Mutex<Option<Credentials>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, credentials: Credentials) {
        *self.record.lock().expect("store lock poisoned") = Some(credentials);
    }

    pub fn get(&self) -> Option<Credentials> {
        self.record.lock().expect("store lock poisoned").clone()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, AuthError> {
        Ok(self.get())
    }

    fn save(&self, credentials: &Credentials) -> Result<(), AuthError> {
        *self.record.lock().expect("store lock poisoned") = Some(credentials.clone());
        Ok(())
    }
}

pub fn config() -> Config {
    Config {
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        redirect_uri: "http://localhost:3000/login".to_string(),
        credentials_path: "unused".into(),
        bind_address: "127.0.0.1".to_string(),
        port: 0,
        http_timeout: std::time::Duration::from_secs(5),
    }
}

pub fn credentials(access_token: &str, expires_at: DateTime<Utc>) -> Credentials {
    Credentials {
        access_token: access_token.to_string(),
        expires_at,
        refresh_token: "refresh-1".to_string(),
    }
}

pub fn fresh_credentials(access_token: &str) -> Credentials {
    credentials(access_token, Utc::now() + Duration::hours(1))
}
