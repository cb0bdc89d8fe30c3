//! Login session persistence.
//!
//! The session is kept in memory behind a read-write lock and mirrored to
//! a small JSON file so the logged-in state survives restarts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::credentials::{CredentialProvider, SecureString, Session};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read session file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write session file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Corrupt session file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk shape of a session.
#[derive(Serialize, Deserialize)]
struct StoredSession {
    jwt: String,
    user_id: u64,
    email: String,
    username: String,
}

impl From<&Session> for StoredSession {
    fn from(session: &Session) -> Self {
        Self {
            jwt: session.jwt.expose().to_string(),
            user_id: session.user_id,
            email: session.email.clone(),
            username: session.username.clone(),
        }
    }
}

impl From<StoredSession> for Session {
    fn from(stored: StoredSession) -> Self {
        Self {
            jwt: SecureString::new(stored.jwt),
            user_id: stored.user_id,
            email: stored.email,
            username: stored.username,
        }
    }
}

/// Session holder with optional file persistence.
pub struct SessionStore {
    current: RwLock<Option<Session>>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            current: RwLock::new(None),
            path: None,
        }
    }

    /// Open the store backed by `path`, loading a previously saved session.
    ///
    /// A missing file means "logged out".
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let current = read_session(&path)?;
        tracing::debug!(
            path = %path.display(),
            logged_in = current.is_some(),
            "Session store opened"
        );
        Ok(Self {
            current: RwLock::new(current),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl CredentialProvider for SessionStore {
    fn session(&self) -> Option<Session> {
        self.current.read().clone()
    }

    fn store(&self, session: Session) -> Result<(), SessionError> {
        if let Some(path) = &self.path {
            write_session(path, &session)?;
        }
        *self.current.write() = Some(session);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.current.write() = None;
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(SessionError::Write {
                        path: path.clone(),
                        source: e,
                    })
                }
            }
        }
        Ok(())
    }
}

fn read_session(path: &Path) -> Result<Option<Session>, SessionError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(SessionError::Read {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    let stored: StoredSession =
        serde_json::from_str(&content).map_err(|e| SessionError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(Some(stored.into()))
}

fn write_session(path: &Path, session: &Session) -> Result<(), SessionError> {
    let write_err = |source| SessionError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let content = serde_json::to_string_pretty(&StoredSession::from(session))
        .map_err(|e| write_err(io::Error::other(e)))?;
    fs::write(path, content).map_err(write_err)
}
