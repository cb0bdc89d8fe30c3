//! Configuration, credentials and the persisted login session.

mod auth;
mod credentials;
mod loader;
mod session;
mod types;

pub use auth::{build_auth_header, AuthHeader};
pub use credentials::{CredentialProvider, SecureString, Session};
pub use loader::{ConfigError, BASE_URL_ENV};
pub use session::{SessionError, SessionStore};
pub use types::{ApiConfig, Config, SessionConfig, UiConfig};
