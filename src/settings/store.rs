use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing::debug;

use crate::errors::RiskmapError;

/// Namespaced key-value persistence. The settings layer is written against
/// this trait so the backing store can be swapped out in tests.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, RiskmapError>;
    fn set(&self, key: &str, value: &str) -> Result<(), RiskmapError>;
    fn delete(&self, key: &str) -> Result<(), RiskmapError>;
}

/// File-backed store: one JSON document per key under a config directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open the store in the platform config directory for this tool.
    pub fn open_default() -> Result<Self, RiskmapError> {
        let dirs = ProjectDirs::from("io", "riskmap", "riskmap").ok_or_else(|| {
            RiskmapError::Storage("Could not determine a config directory".into())
        })?;
        Self::open(dirs.config_dir())
    }

    pub fn open(root: impl Into<PathBuf>) -> Result<Self, RiskmapError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| RiskmapError::Storage(format!("Failed to create {}: {}", root.display(), e)))?;
        debug!(root = %root.display(), "Opened file store");
        Ok(FileStore { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, RiskmapError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RiskmapError::Storage(format!("Failed to read {}: {}", key, e))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RiskmapError> {
        // Write-then-rename so a crash never leaves a torn document behind.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .map_err(|e| RiskmapError::Storage(format!("Failed to write {}: {}", key, e)))?;
        fs::rename(&tmp, &path)
            .map_err(|e| RiskmapError::Storage(format!("Failed to persist {}: {}", key, e)))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), RiskmapError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RiskmapError::Storage(format!("Failed to delete {}: {}", key, e))),
        }
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, RiskmapError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RiskmapError> {
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), RiskmapError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
