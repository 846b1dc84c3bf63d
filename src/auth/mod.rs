//! OAuth token lifecycle: credential storage, code exchange, refresh.

pub mod credentials;
pub mod error;
pub mod manager;
pub mod store;

pub use credentials::Credentials;
pub use error::AuthError;
pub use manager::TokenManager;
pub use store::{CredentialStore, FileCredentialStore};
