//! Advisory store locking

use std::fs;
use std::path::{Path, PathBuf};

use fslock::LockFile;

use super::LOCK_FILE;
use crate::error::{FederationError, Result};

/// RAII guard for store locking
///
/// Acquires an advisory file lock on creation and releases it on drop, so two
/// fedmap processes never run a resolve-and-synthesize pass against the same
/// store at once.
#[derive(Debug)]
pub struct StoreGuard {
    lock: LockFile,
    #[allow(dead_code)]
    lock_path: PathBuf,
}

impl StoreGuard {
    /// Try to acquire the store lock without blocking, creating the store directory if needed
    pub fn acquire(store_dir: &Path) -> Result<Self> {
        fs::create_dir_all(store_dir)?;
        let lock_path = store_dir.join(LOCK_FILE);

        let mut lock = LockFile::open(&lock_path).map_err(|e| FederationError::IoError {
            message: format!("Failed to open lock file: {e}"),
        })?;

        let acquired = lock.try_lock().map_err(|e| FederationError::IoError {
            message: format!("Failed to try lock: {e}"),
        })?;

        if !acquired {
            return Err(FederationError::StoreLocked);
        }

        Ok(Self { lock, lock_path })
    }
}

impl Drop for StoreGuard {
    fn drop(&mut self) {
        let _ = self.lock.unlock();
    }
}
