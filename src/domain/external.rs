//! Persisted registry records
//!
//! These are the shapes the external registry stages in memory and the store
//! writes on commit. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Cached metadata of one remote
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteInfo {
    /// Base URL all of the remote's relative files resolve against
    pub scope_url: String,

    /// Exposed modules
    #[serde(default)]
    pub exposes: Vec<RemoteModule>,
}

/// An exposed module as cached in `RemoteInfo`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteModule {
    pub module_name: String,
    pub file: String,
}

/// A singleton dependency within one scope
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SharedExternal {
    /// Resolution still owed
    pub dirty: bool,

    /// Versions, sorted descending by semver precedence
    pub versions: Vec<SharedVersion>,
}

/// One version of a shared external and every remote that contributed it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SharedVersion {
    pub tag: String,
    pub host: bool,
    pub action: Action,
    pub remotes: Vec<RemoteRef>,
}

/// A remote's claim on a shared version
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRef {
    pub name: String,
    pub file: String,
    pub required_version: String,
    pub strict_version: bool,

    /// This file will actually appear in the import map
    pub cached: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,
}

/// A non-singleton dependency, always resolved into its remote's own scope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScopedExternal {
    pub tag: String,
    pub file: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,
}

/// Per-version resolution outcome
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Canonical version, importable by everyone in the scope
    Share,
    /// Redundant, served by the canonical version
    Skip,
    /// Incompatible, confined to the contributing remotes' own scopes
    Scope,
    /// Redirected to another version's file within a share scope
    Override,
}

/// Resolution policy of a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeType {
    Global,
    ShareScope,
    Strict,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::Share => "share",
            Action::Skip => "skip",
            Action::Scope => "scope",
            Action::Override => "override",
        };
        f.write_str(name)
    }
}

impl SharedVersion {
    /// Create a version record with a single contributing remote
    pub fn new(tag: impl Into<String>, host: bool, action: Action, remote: RemoteRef) -> Self {
        Self {
            tag: tag.into(),
            host,
            action,
            remotes: vec![remote],
        }
    }

    /// The remote whose file represents this version
    pub fn first_ref(&self) -> Option<&RemoteRef> {
        self.remotes.first()
    }

    /// Whether the given remote contributed this version
    pub fn has_remote(&self, name: &str) -> bool {
        self.remotes.iter().any(|r| r.name == name)
    }
}

impl SharedExternal {
    /// Indices of the versions currently marked `share`
    pub fn shared_indices(&self) -> Vec<usize> {
        self.versions
            .iter()
            .enumerate()
            .filter(|(_, v)| v.action == Action::Share)
            .map(|(i, _)| i)
            .collect()
    }

    /// Remove every ref of a remote, dropping versions left without refs.
    ///
    /// Returns true if anything was removed.
    pub fn remove_remote(&mut self, remote_name: &str) -> bool {
        let mut changed = false;
        for version in &mut self.versions {
            let before = version.remotes.len();
            version.remotes.retain(|r| r.name != remote_name);
            changed |= version.remotes.len() != before;
        }
        self.versions.retain(|v| !v.remotes.is_empty());
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote_ref(name: &str) -> RemoteRef {
        RemoteRef {
            name: name.to_string(),
            file: "dep-a.js".to_string(),
            required_version: "~1.2.1".to_string(),
            strict_version: false,
            cached: false,
            bundle: None,
        }
    }

    #[test]
    fn test_action_serializes_lowercase() {
        let json = serde_json::to_string(&Action::Override).unwrap();
        assert_eq!(json, "\"override\"");
        let action: Action = serde_json::from_str("\"scope\"").unwrap();
        assert_eq!(action, Action::Scope);
    }

    #[test]
    fn test_remote_ref_camel_case() {
        let json = serde_json::to_string(&remote_ref("team/mfe1")).unwrap();
        assert!(json.contains("\"requiredVersion\":\"~1.2.1\""));
        assert!(json.contains("\"strictVersion\":false"));
        assert!(!json.contains("bundle"));
    }

    #[test]
    fn test_remove_remote_drops_empty_versions() {
        let mut external = SharedExternal {
            dirty: false,
            versions: vec![
                SharedVersion::new("1.2.3", false, Action::Share, remote_ref("team/mfe1")),
                SharedVersion {
                    tag: "1.2.1".to_string(),
                    host: false,
                    action: Action::Skip,
                    remotes: vec![remote_ref("team/mfe1"), remote_ref("team/mfe2")],
                },
            ],
        };

        assert!(external.remove_remote("team/mfe1"));
        assert_eq!(external.versions.len(), 1);
        assert_eq!(external.versions[0].tag, "1.2.1");
        assert!(external.versions[0].has_remote("team/mfe2"));
        assert!(!external.remove_remote("team/unknown"));
    }

    #[test]
    fn test_shared_indices() {
        let external = SharedExternal {
            dirty: false,
            versions: vec![
                SharedVersion::new("2.0.0", false, Action::Share, remote_ref("a")),
                SharedVersion::new("1.0.0", false, Action::Skip, remote_ref("b")),
                SharedVersion::new("0.9.0", false, Action::Share, remote_ref("c")),
            ],
        };
        assert_eq!(external.shared_indices(), vec![0, 2]);
    }
}
