//! File-backed slot storage
//!
//! Each slot is a JSON file named after its key inside one directory. Writes
//! go to a sibling temporary file first and are renamed into place, so a
//! crash mid-write leaves the previous value intact.

use crate::error::{Result, RosterError};
use crate::storage::KeyValueStore;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Slot storage rooted at a directory
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `root`; the directory is created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the file backing `key`
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn storage_error(action: &str, path: &Path, err: std::io::Error) -> anyhow::Error {
        RosterError::StorageError {
            message: format!("Failed to {} {}: {}", action, path.display(), err),
        }
        .into()
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Self::storage_error("read", &path, err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root)
            .map_err(|e| Self::storage_error("create", &self.root, e))?;

        let path = self.slot_path(key);
        let tmp_path = self.root.join(format!("{}.json.tmp", key));
        fs::write(&tmp_path, value).map_err(|e| Self::storage_error("write", &tmp_path, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| Self::storage_error("replace", &path, e))?;

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let path = self.slot_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(Self::storage_error("remove", &path, err)),
        }
    }
}
