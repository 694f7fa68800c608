//! Session - the signed-in identity.
//!
//! The identity is a bare username persisted under [`IDENTITY_KEY`]; its presence is the only
//! signal of being logged in. A [`Session`] reads it once when restored and is then passed
//! explicitly to whoever needs it. Nothing re-reads the store behind its back.

use crate::model::Username;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info};

/// Fixed key the username is stored under.
pub const IDENTITY_KEY: &str = "username";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Identity store unavailable: {0}")]
    Unavailable(String),
}

/// Persistent key-value storage for the identity.
pub trait IdentityStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn save(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// Identity storage backed by a JSON object on disk, created on first save.
#[derive(Debug, Clone)]
pub struct FileIdentityStore {
    file_path: PathBuf,
}

impl FileIdentityStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, SessionError> {
        if !self.file_path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.file_path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.file_path, content)?;
        Ok(())
    }
}

impl IdentityStore for FileIdentityStore {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.read()?.remove(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self.read()?;
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = self.read()?;
        if entries.remove(key).is_some() {
            self.write(&entries)?;
        }
        Ok(())
    }
}

/// In-memory identity storage, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, SessionError> {
        self.entries
            .lock()
            .map_err(|e| SessionError::Unavailable(e.to_string()))
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// The current identity, read once from its store.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn IdentityStore>,
    user: Option<Username>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("user", &self.user).finish()
    }
}

impl Session {
    /// Reads the persisted identity. A blank stored value counts as signed out.
    pub fn restore(store: Arc<dyn IdentityStore>) -> Result<Self, SessionError> {
        let user = store
            .load(IDENTITY_KEY)?
            .filter(|name| !name.trim().is_empty())
            .map(Username::new);
        info!(user = ?user, "Session restored");
        Ok(Self { store, user })
    }

    pub fn user(&self) -> Option<&Username> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Persists `username` and makes it the current identity.
    pub fn sign_in(&mut self, username: Username) -> Result<(), SessionError> {
        self.store.save(IDENTITY_KEY, username.as_str())?;
        info!(%username, "Signed in");
        self.user = Some(username);
        Ok(())
    }

    /// Removes the persisted identity. Returns who was signed in, if anyone.
    pub fn sign_out(&mut self) -> Result<Option<Username>, SessionError> {
        self.store.remove(IDENTITY_KEY)?;
        let previous = self.user.take();
        debug!(user = ?previous, "Signed out");
        Ok(previous)
    }
}
