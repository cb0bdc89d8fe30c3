//! Credential types shared by the HTTP client and the auth holder.
//!
//! The JWT lives behind the [`CredentialProvider`] trait so every service
//! reads it through an injected handle instead of global state.

use super::session::SessionError;

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs or disk.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// An authenticated user as remembered between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub jwt: SecureString,
    pub user_id: u64,
    pub email: String,
    pub username: String,
}

/// Read/write access to the current login session.
///
/// Services read the token for every request; login and logout intents
/// write it. Implementations must be safe to share across tasks.
pub trait CredentialProvider: Send + Sync {
    /// Current session, if logged in.
    fn session(&self) -> Option<Session>;

    /// Replace the current session (login/register).
    fn store(&self, session: Session) -> Result<(), SessionError>;

    /// Forget the current session (logout).
    fn clear(&self) -> Result<(), SessionError>;

    /// Bearer token of the current session, if any.
    fn token(&self) -> Option<SecureString> {
        self.session().map(|s| s.jwt).filter(|jwt| !jwt.is_empty())
    }

    fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_string_does_not_leak() {
        let secret = SecureString::new("eyJhbGciOiJIUzI1NiJ9.secret".to_string());

        let debug_output = format!("{:?}", secret);
        assert!(!debug_output.contains("secret"));
        assert!(debug_output.contains("••••••••"));

        let display_output = format!("{}", secret);
        assert!(!display_output.contains("secret"));

        assert_eq!(secret.expose(), "eyJhbGciOiJIUzI1NiJ9.secret");
    }

    #[test]
    fn session_debug_masks_token() {
        let session = Session {
            jwt: SecureString::new("jwt-value".to_string()),
            user_id: 4,
            email: "farmer@example.com".to_string(),
            username: "farmer".to_string(),
        };
        let out = format!("{:?}", session);
        assert!(!out.contains("jwt-value"));
        assert!(out.contains("farmer@example.com"));
    }
}
