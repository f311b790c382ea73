//! Session token storage and lifecycle.
//!
//! The token is an opaque bearer credential issued by the backend at login.
//! It lives behind [`SessionStore`] so the gateway never touches a global:
//! the CLI persists it to a JSON file per profile, embedders and tests use
//! [`MemorySessionStore`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Durable key-value slot holding the session token.
pub trait SessionStore: Send + Sync {
    fn token(&self) -> Result<Option<String>, SessionError>;
    fn store(&self, token: &str) -> Result<(), SessionError>;
    /// Remove the token. Returns whether one was present.
    fn clear(&self) -> Result<bool, SessionError>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Result<Option<String>, SessionError> {
        let slot = self.token.read().map_err(|_| SessionError::Poisoned)?;
        Ok(slot.clone())
    }

    fn store(&self, token: &str) -> Result<(), SessionError> {
        let mut slot = self.token.write().map_err(|_| SessionError::Poisoned)?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<bool, SessionError> {
        let mut slot = self.token.write().map_err(|_| SessionError::Poisoned)?;
        Ok(slot.take().is_some())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    token: String,
}

/// Token persisted as `{"token": "..."}` in a single file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.hms/session.<profile>.json`
    pub fn for_profile(profile: &str) -> Result<Self, SessionError> {
        let dir = dirs::home_dir().ok_or(SessionError::NoHomeDir)?.join(".hms");
        Ok(Self::new(dir.join(format!("session.{profile}.json"))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Result<Option<String>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let file: SessionFile = serde_json::from_str(&content)?;
        Ok(Some(file.token))
    }

    fn store(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&SessionFile {
            token: token.to_string(),
        })?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn clear(&self) -> Result<bool, SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No token stored.
    Anonymous,
    /// Token stored and not known to be rejected.
    Authenticated,
    /// Token still stored but the backend answered with code 401.
    Expired,
}

/// Session service shared by the gateway and its effect handler.
pub struct Session {
    store: Box<dyn SessionStore>,
    expired: AtomicBool,
}

impl Session {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            expired: AtomicBool::new(false),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemorySessionStore::new())
    }

    pub fn token(&self) -> Result<Option<String>, SessionError> {
        self.store.token()
    }

    /// Login: Anonymous -> Authenticated.
    pub fn login(&self, token: &str) -> Result<(), SessionError> {
        self.store.store(token)?;
        self.expired.store(false, Ordering::SeqCst);
        tracing::debug!("session token stored");
        Ok(())
    }

    /// Authenticated -> Expired. The token stays until [`Session::clear`].
    pub fn mark_expired(&self) {
        self.expired.store(true, Ordering::SeqCst);
        tracing::info!("session marked expired");
    }

    /// Expired -> Anonymous (also used for an explicit logout).
    pub fn clear(&self) -> Result<bool, SessionError> {
        let removed = self.store.clear()?;
        self.expired.store(false, Ordering::SeqCst);
        tracing::info!(removed, "session token cleared");
        Ok(removed)
    }

    pub fn state(&self) -> SessionState {
        match self.store.token() {
            Ok(Some(_)) if self.expired.load(Ordering::SeqCst) => SessionState::Expired,
            Ok(Some(_)) => SessionState::Authenticated,
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                tracing::warn!(error = %e, "session store unreadable; treating as anonymous");
                SessionState::Anonymous
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
