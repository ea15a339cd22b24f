//! I/O collaborators
//!
//! Resolution never fetches or writes anything itself. Manifests and remote
//! entries come in through the provider traits; finished import maps leave
//! through [`Browser`]. The filesystem implementations in [`fs`] and
//! [`browser`] are what the CLI wires up.

pub mod browser;
pub mod fs;

use async_trait::async_trait;

use crate::domain::{ImportMap, Manifest, RemoteEntry};
use crate::error::Result;

pub use browser::ImportMapWriter;
pub use fs::{FsManifestProvider, FsRemoteEntryProvider};

/// Supplies the remote name to remote entry URL manifest
#[async_trait]
pub trait ManifestProvider: Send + Sync {
    async fn provide(&self, source: &str) -> Result<Manifest>;
}

/// Fetches one remote entry document
#[async_trait]
pub trait RemoteEntryProvider: Send + Sync {
    async fn provide(&self, url: &str) -> Result<RemoteEntry>;
}

/// Receives the committed import map and loads modules through it
#[async_trait]
pub trait Browser: Send {
    fn set_import_map(&mut self, import_map: &ImportMap) -> Result<()>;

    async fn import_module(&mut self, url: &str) -> Result<()>;
}
