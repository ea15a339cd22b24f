//! Filesystem-backed providers
//!
//! Locations are either paths relative to a base directory or `file://`
//! URLs. Query strings and fragments (such as a `cacheTag`) are ignored when
//! reading. Other schemes are rejected with `FetchFailed`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{Manifest, RemoteEntry};
use crate::error::{FederationError, Result};

use super::{ManifestProvider, RemoteEntryProvider};

/// Reads a manifest from inline JSON or a JSON file
#[derive(Debug, Clone)]
pub struct FsManifestProvider {
    base_dir: PathBuf,
}

/// Reads remote entries from JSON files
#[derive(Debug, Clone)]
pub struct FsRemoteEntryProvider {
    base_dir: PathBuf,
}

impl FsManifestProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl FsRemoteEntryProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

#[async_trait]
impl ManifestProvider for FsManifestProvider {
    async fn provide(&self, source: &str) -> Result<Manifest> {
        let content = if source.trim_start().starts_with('{') {
            source.to_string()
        } else {
            read_location(&self.base_dir, source).await?
        };

        serde_json::from_str(&content).map_err(|e| FederationError::FetchFailed {
            url: source.to_string(),
            reason: format!("invalid manifest: {e}"),
        })
    }
}

#[async_trait]
impl RemoteEntryProvider for FsRemoteEntryProvider {
    async fn provide(&self, url: &str) -> Result<RemoteEntry> {
        let content = read_location(&self.base_dir, url).await?;
        let mut entry = RemoteEntry::from_json(&content).map_err(|e| FederationError::FetchFailed {
            url: url.to_string(),
            reason: format!("invalid remote entry: {e}"),
        })?;

        if entry.url.is_empty() {
            entry.url = url.to_string();
        }
        Ok(entry)
    }
}

/// Resolve a location to a local path
fn local_path(base_dir: &Path, location: &str) -> Result<PathBuf> {
    let location = location.split(['?', '#']).next().unwrap_or(location);

    if let Some(path) = location.strip_prefix("file://") {
        return Ok(PathBuf::from(path));
    }
    if let Some((scheme, _)) = location.split_once("://") {
        return Err(FederationError::FetchFailed {
            url: location.to_string(),
            reason: format!("unsupported scheme '{scheme}'"),
        });
    }
    Ok(base_dir.join(location))
}

async fn read_location(base_dir: &Path, location: &str) -> Result<String> {
    let path = local_path(base_dir, location)?;
    debug!("Reading {}", path.display());

    tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| FederationError::FetchFailed {
            url: location.to_string(),
            reason: e.to_string(),
        })
}
