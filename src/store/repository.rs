//! Persistence seam for collection snapshots.
//!
//! Every collection is persisted as one whole JSON snapshot under a string
//! key. Mutators replace the entire snapshot, so a reader never observes a
//! partially-written collection. Unreadable snapshots fail open to an empty
//! collection.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Keyed snapshot storage. `None` from `read` means the key was never
/// written, which is what first-run seeding keys off.
pub trait Repository: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, RepositoryError>;
    fn write(&self, key: &str, payload: &str) -> Result<(), RepositoryError>;
}

/// Loads a collection snapshot, failing open: a missing key or an
/// unparsable payload both yield an empty collection.
pub fn load_collection<T: DeserializeOwned>(repo: &dyn Repository, key: &str) -> Vec<T> {
    match repo.read(key) {
        Ok(Some(payload)) => match serde_json::from_str(&payload) {
            Ok(items) => items,
            Err(e) => {
                warn!(key, error = %e, "Unreadable collection snapshot, starting empty");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "Collection read failed, starting empty");
            Vec::new()
        }
    }
}

/// Replaces a collection snapshot wholesale.
pub fn store_collection<T: Serialize>(
    repo: &dyn Repository,
    key: &str,
    items: &[T],
) -> Result<(), RepositoryError> {
    let payload = serde_json::to_string_pretty(items)?;
    repo.write(key, &payload)
}

/// Filesystem-backed repository: one `<key>.json` file per collection,
/// written atomically via a temp file and rename.
pub struct JsonFileRepository {
    base_dir: PathBuf,
}

impl JsonFileRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl Repository for JsonFileRepository {
    fn read(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), RepositoryError> {
        let path = self.key_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory repository for tests and ephemeral deployments.
#[derive(Default)]
#[allow(dead_code)]
pub struct MemoryRepository {
    entries: Mutex<HashMap<String, String>>,
}

#[allow(dead_code)]
impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for MemoryRepository {
    fn read(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), RepositoryError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}
