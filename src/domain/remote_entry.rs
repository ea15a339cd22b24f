//! Incoming remote entry documents
//!
//! A `RemoteEntry` is produced by the fetch collaborator and consumed once by
//! ingestion. Nothing in it is trusted: versions are validated and names are
//! only looked up, never interpreted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Manifest: remote name to remote entry URL
pub type Manifest = BTreeMap<String, String>;

/// Remote entry (remoteEntry.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEntry {
    /// Remote name (e.g., "team/mfe1")
    pub name: String,

    /// URL the entry was fetched from; its directory is the remote's scope URL
    #[serde(default)]
    pub url: String,

    /// Whether this remote is the host application
    #[serde(default)]
    pub host: bool,

    /// Replace all cached state of this remote instead of merging into it
    #[serde(default, rename = "override")]
    pub override_cache: bool,

    /// Exposed modules
    #[serde(default)]
    pub exposes: Vec<ExposedModule>,

    /// Shared dependency declarations
    #[serde(default)]
    pub shared: Vec<SharedInfo>,

    /// Chunk file lists per bundle name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks: Option<BTreeMap<String, Vec<String>>>,
}

/// An exposed module of a remote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExposedModule {
    /// Public key (e.g., "./Button")
    pub key: String,

    /// Output file relative to the remote's scope URL
    pub out_file_name: String,
}

/// A shared dependency declaration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SharedInfo {
    pub package_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    pub required_version: String,

    #[serde(default)]
    pub strict_version: bool,

    #[serde(default)]
    pub singleton: bool,

    pub out_file_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_scope: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,
}

impl RemoteEntry {
    /// Parse a remote entry from a JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
