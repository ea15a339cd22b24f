//! Durable storage for the external registry
//!
//! The registry is one JSON document ([`StoreState`]). Storage backends only
//! read and write whole documents; staging and the single write-through point
//! live in [`crate::transaction`].
//!
//! ## Store Structure
//!
//! ```text
//! .fedmap/
//! ├── store.json   # Remotes, externals, chunks and the live import map
//! └── .lock        # Advisory lock held for the whole command
//! ```

pub mod json;
pub mod lock;
#[cfg(test)]
pub mod memory;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{ImportMap, RemoteInfo, ScopedExternal, SharedExternal};
use crate::error::Result;

pub use json::JsonFileStorage;
pub use lock::StoreGuard;
#[cfg(test)]
pub use memory::MemoryStorage;

/// Store file name
pub const STORE_FILE: &str = "store.json";

/// Lock file name
pub const LOCK_FILE: &str = ".lock";

/// The whole durable registry document
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    /// Remote name -> cached remote metadata
    #[serde(default)]
    pub remotes: BTreeMap<String, RemoteInfo>,

    /// Remote name -> package name -> non-singleton external
    #[serde(default)]
    pub scoped_externals: BTreeMap<String, BTreeMap<String, ScopedExternal>>,

    /// Scope key -> package name -> singleton external
    #[serde(default)]
    pub shared_externals: BTreeMap<String, BTreeMap<String, SharedExternal>>,

    /// Remote name -> bundle name -> chunk files
    #[serde(default)]
    pub chunks: BTreeMap<String, BTreeMap<String, Vec<String>>>,

    /// Last committed import map
    #[serde(default)]
    pub import_map: ImportMap,
}

/// Durable storage port
pub trait Storage {
    /// Read the committed document (empty when nothing was committed yet)
    fn read(&self) -> Result<StoreState>;

    /// Replace the committed document
    fn write(&mut self, state: &StoreState) -> Result<()>;
}
