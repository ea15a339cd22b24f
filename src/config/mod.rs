//! Configuration (fedmap.yaml)
//!
//! ```yaml
//! strict:
//!   externalVersion: true
//!   importMap: true
//! profile:
//!   latestSharedExternal: false
//!   skipCachedRemotes: dynamic-only
//!   overrideCachedRemotes: always
//! hostRemoteEntry:
//!   url: ./host/remoteEntry.json
//!   cacheTag: "2024-05-01"
//! ```
//!
//! `strict: true` enables every strict flag. Every key is optional.

pub mod strict;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::HOST_REMOTE_NAME;
use crate::error::{FederationError, Result};

pub use strict::StrictFlags;

/// Default configuration file name
pub const CONFIG_FILE: &str = "fedmap.yaml";

/// Resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub strict: StrictFlags,

    #[serde(default)]
    pub profile: Profile,

    #[serde(default, with = "host_entry")]
    pub host_remote_entry: Option<HostRemoteEntry>,
}

/// Resolution profile
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Profile {
    /// Prefer the highest version over the fewest extra downloads
    #[serde(default)]
    pub latest_shared_external: bool,

    #[serde(default)]
    pub skip_cached_remotes: SkipCachedRemotes,

    #[serde(default)]
    pub override_cached_remotes: OverrideCachedRemotes,
}

/// When to skip fetching a remote that is already cached
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SkipCachedRemotes {
    Always,
    Never,
    #[default]
    DynamicOnly,
}

/// Whether a re-fetched cached remote replaces its cached state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OverrideCachedRemotes {
    #[default]
    Always,
    Never,
}

/// The host application's own remote entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HostRemoteEntry {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_tag: Option<String>,
}

impl HostRemoteEntry {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(HOST_REMOTE_NAME)
    }

    /// URL with the cache tag appended as a query parameter
    pub fn tagged_url(&self) -> String {
        match &self.cache_tag {
            Some(tag) if self.url.contains('?') => format!("{}&cacheTag={tag}", self.url),
            Some(tag) => format!("{}?cacheTag={tag}", self.url),
            None => self.url.clone(),
        }
    }
}

impl SkipCachedRemotes {
    /// Whether a cached remote is skipped in batch (`dynamic == false`) or dynamic mode
    pub fn skips(self, dynamic: bool) -> bool {
        match self {
            SkipCachedRemotes::Always => true,
            SkipCachedRemotes::Never => false,
            SkipCachedRemotes::DynamicOnly => dynamic,
        }
    }
}

impl Config {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `fedmap.yaml` in `dir` is
    /// used if present and the defaults otherwise.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) if !path.is_file() => {
                return Err(FederationError::ConfigNotFound {
                    path: path.display().to_string(),
                });
            }
            Some(path) => path.to_path_buf(),
            None => {
                let default = dir.join(CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = fs::read_to_string(&path).map_err(|e| FederationError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            FederationError::ConfigParseFailed { reason, .. } => {
                FederationError::ConfigParseFailed {
                    path: path.display().to_string(),
                    reason,
                }
            }
            other => other,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(host) = &self.host_remote_entry {
            if host.url.trim().is_empty() {
                return Err(FederationError::ConfigInvalid {
                    message: "hostRemoteEntry.url cannot be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// `hostRemoteEntry` is either `false` or an object
mod host_entry {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::HostRemoteEntry;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Setting {
        Flag(bool),
        Entry(HostRemoteEntry),
    }

    pub fn serialize<S>(value: &Option<HostRemoteEntry>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(entry) => entry.serialize(serializer),
            None => serializer.serialize_bool(false),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<HostRemoteEntry>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Setting::deserialize(deserializer)? {
            Setting::Flag(false) => Ok(None),
            Setting::Flag(true) => Err(serde::de::Error::custom(
                "hostRemoteEntry must be false or an object with a url",
            )),
            Setting::Entry(entry) => Ok(Some(entry)),
        }
    }
}
