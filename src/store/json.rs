//! JSON file storage (`.fedmap/store.json`)

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{STORE_FILE, Storage, StoreState};
use crate::error::{FederationError, Result};

/// Storage backed by a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    /// Path to store.json
    path: PathBuf,
}

impl JsonFileStorage {
    /// Storage for the store file inside `store_dir`
    pub fn new(store_dir: &Path) -> Self {
        Self {
            path: store_dir.join(STORE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_failed(&self, reason: impl ToString) -> FederationError {
        FederationError::StoreWriteFailed {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl Storage for JsonFileStorage {
    fn read(&self) -> Result<StoreState> {
        if !self.path.exists() {
            return Ok(StoreState::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| FederationError::StoreReadFailed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| FederationError::StoreReadFailed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Write atomically: a temp file in the same directory is persisted over the target
    fn write(&mut self, state: &StoreState) -> Result<()> {
        let dir = self
            .path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        fs::create_dir_all(&dir).map_err(|e| self.write_failed(e))?;

        let content = serde_json::to_string_pretty(state).map_err(|e| self.write_failed(e))?;

        let mut temp = NamedTempFile::new_in(&dir).map_err(|e| self.write_failed(e))?;
        temp.write_all(content.as_bytes())
            .and_then(|()| temp.write_all(b"\n"))
            .map_err(|e| self.write_failed(e))?;
        temp.persist(&self.path).map_err(|e| self.write_failed(e.error))?;

        Ok(())
    }
}
