//! Bearer token storage.
//!
//! The token is the only piece of client state that outlives a command. It is
//! written on login, read before every request and cleared on logout or when
//! the server rejects it. There is no client-side expiry tracking.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors raised by a session store.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("Session lock poisoned")]
    Poisoned,
}

/// Persistent home for the access token.
pub trait SessionStore: Send + Sync {
    /// The current token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get_token(&self) -> Result<Option<SecretString>, SessionError>;

    /// Replace the token. Takes effect for the next request.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set_token(&self, token: SecretString) -> Result<(), SessionError>;

    /// Forget the token.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn clear_token(&self) -> Result<(), SessionError>;
}

/// Token held in process memory only.
#[derive(Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<SecretString>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get_token(&self) -> Result<Option<SecretString>, SessionError> {
        let guard = self.token.read().map_err(|_| SessionError::Poisoned)?;
        Ok(guard.clone())
    }

    fn set_token(&self, token: SecretString) -> Result<(), SessionError> {
        let mut guard = self.token.write().map_err(|_| SessionError::Poisoned)?;
        *guard = Some(token);
        Ok(())
    }

    fn clear_token(&self) -> Result<(), SessionError> {
        let mut guard = self.token.write().map_err(|_| SessionError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionFile {
    #[serde(default)]
    access_token: Option<String>,
}

/// Token persisted as `{"accessToken": "..."}` in a JSON file.
///
/// The file is re-read on every access so that separate CLI invocations see
/// each other's logins.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, file: &SessionFile) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut handle = options.open(&self.path)?;
        handle.write_all(&serde_json::to_vec(file)?)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get_token(&self) -> Result<Option<SecretString>, SessionError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: SessionFile = serde_json::from_slice(&bytes)?;
        Ok(file
            .access_token
            .filter(|t| !t.is_empty())
            .map(SecretString::from))
    }

    fn set_token(&self, token: SecretString) -> Result<(), SessionError> {
        self.write(&SessionFile {
            access_token: Some(token.expose_secret().to_string()),
        })?;
        debug!(path = %self.path.display(), "Session token stored");
        Ok(())
    }

    fn clear_token(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session token cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Shared handle to a session store.
///
/// Cloning is cheap; every clone sees the same token.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    /// Wrap a store.
    #[must_use]
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// A session that lives only as long as the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemorySessionStore::new())
    }

    /// A session persisted to `path`.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileSessionStore::new(path))
    }

    /// The current token.
    ///
    /// # Errors
    ///
    /// Propagates store read failures.
    pub fn token(&self) -> Result<Option<SecretString>, SessionError> {
        self.store.get_token()
    }

    /// Whether a token is present. Read failures count as signed out.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.store.get_token(), Ok(Some(_)))
    }

    /// Store a new token.
    ///
    /// # Errors
    ///
    /// Propagates store write failures.
    pub fn set_token(&self, token: SecretString) -> Result<(), SessionError> {
        self.store.set_token(token)
    }

    /// Drop the token.
    ///
    /// # Errors
    ///
    /// Propagates store write failures.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.store.clear_token()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
