//! Authentication header building for API requests.

use super::credentials::CredentialProvider;

/// Header name and value for authentication.
pub type AuthHeader = (String, String);

/// Build the authentication header from the current session.
///
/// Returns `Some(("Authorization", "Bearer <jwt>"))` once a token is stored,
/// or `None` when logged out.
pub fn build_auth_header(credentials: &dyn CredentialProvider) -> Option<AuthHeader> {
    credentials
        .token()
        .map(|jwt| ("Authorization".to_string(), format!("Bearer {}", jwt.expose())))
}
