//! Durable storage for the persisted subset of store state.
//!
//! The subset (cart, wishlist, theme, language, currency, user snapshot and
//! authenticated flag) is declared once, as [`PersistedState`]. It is
//! written under a single namespace key inside a versioned envelope:
//!
//! ```json
//! { "state": { "cart": [...], "wishlist": [...], "theme": "light", ... }, "version": 0 }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sportswear_store_core::{CurrencyCode, Language, Theme};

use crate::cart::Cart;
use crate::models::User;
use crate::wishlist::Wishlist;

/// Namespace key the store state is written under.
pub const DEFAULT_STORAGE_KEY: &str = "sportswear-store";

/// Envelope version written by this build. Snapshots with another version
/// are discarded on load.
pub const SNAPSHOT_VERSION: u32 = 0;

/// Errors from a [`StateStorage`] backend or snapshot encoding.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("snapshot encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("snapshot version {found} does not match expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("storage lock poisoned")]
    Poisoned,
}

/// The fields of store state that survive a restart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub cart: Cart,
    pub wishlist: Wishlist,
    pub theme: Theme,
    pub language: Language,
    pub currency: CurrencyCode,
    pub user: Option<User>,
    pub is_authenticated: bool,
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    state: PersistedState,
    version: u32,
}

/// Serialize a snapshot into its stored form.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be serialized.
pub fn encode(state: &PersistedState) -> Result<String, StorageError> {
    #[derive(Serialize)]
    struct EnvelopeRef<'a> {
        state: &'a PersistedState,
        version: u32,
    }

    Ok(serde_json::to_string(&EnvelopeRef {
        state,
        version: SNAPSHOT_VERSION,
    })?)
}

/// Parse a stored snapshot.
///
/// # Errors
///
/// Returns an error if the data is malformed or was written with another
/// envelope version.
pub fn decode(raw: &str) -> Result<PersistedState, StorageError> {
    let envelope: Envelope = serde_json::from_str(raw)?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(StorageError::VersionMismatch {
            found: envelope.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    Ok(envelope.state)
}

/// A key-value store for serialized state (the local-storage seam).
pub trait StateStorage: Send + Sync {
    /// Read the value under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`; deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.read().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| StorageError::Poisoned)?;
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| StorageError::Poisoned)?;
        items.remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a directory.
///
/// Writes go to a temporary file that is renamed over the target, so a
/// crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl StateStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&path)(err)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(io_error(&tmp))?;
        std::fs::rename(&tmp, &path).map_err(io_error(&path))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(io_error(&path)(err)),
            _ => Ok(()),
        }
    }
}

/// Reads and writes the persisted subset under one namespace key.
#[derive(Clone)]
pub struct Persister {
    storage: Arc<dyn StateStorage>,
    key: String,
}

impl std::fmt::Debug for Persister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persister").field("key", &self.key).finish()
    }
}

impl Persister {
    #[must_use]
    pub fn new(storage: Arc<dyn StateStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored snapshot.
    ///
    /// Missing, unreadable, corrupt or version-mismatched data yields
    /// `None`; failures are logged, never returned.
    #[must_use]
    pub fn load(&self) -> Option<PersistedState> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "No stored state, starting fresh");
                return None;
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "Failed to read stored state");
                return None;
            }
        };

        match decode(&raw) {
            Ok(state) => Some(state),
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "Discarding unreadable stored state");
                None
            }
        }
    }

    /// Write a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the storage write fails.
    pub fn save(&self, state: &PersistedState) -> Result<(), StorageError> {
        let raw = encode(state)?;
        self.storage.set_item(&self.key, &raw)
    }

    /// Delete the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.key)
    }
}
