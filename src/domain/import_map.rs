//! Browser import map (`{imports, scopes}`)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Specifier to URL mapping
pub type Imports = BTreeMap<String, String>;

/// Import map as consumed by the browser's native module loader
///
/// Maps are ordered so that serializing the same map twice is byte-identical.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ImportMap {
    #[serde(default)]
    pub imports: Imports,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scopes: BTreeMap<String, Imports>,
}

impl ImportMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a top-level import exists for a specifier
    pub fn has_import(&self, specifier: &str) -> bool {
        self.imports.contains_key(specifier)
    }

    /// Set a top-level import, overwriting any previous value
    pub fn add_import(&mut self, specifier: impl Into<String>, url: impl Into<String>) {
        self.imports.insert(specifier.into(), url.into());
    }

    /// Set a scoped import, overwriting any previous value in that scope
    pub fn add_scoped(
        &mut self,
        scope: impl Into<String>,
        specifier: impl Into<String>,
        url: impl Into<String>,
    ) {
        self.scopes
            .entry(scope.into())
            .or_default()
            .insert(specifier.into(), url.into());
    }

    /// Look up a scoped import
    pub fn scoped(&self, scope: &str, specifier: &str) -> Option<&str> {
        self.scopes
            .get(scope)
            .and_then(|s| s.get(specifier))
            .map(String::as_str)
    }

    /// Layer another map on top of this one.
    ///
    /// Entries of `other` overwrite entries with the same key; nothing is removed.
    pub fn merge(&mut self, other: ImportMap) {
        self.imports.extend(other.imports);
        for (scope, imports) in other.scopes {
            self.scopes.entry(scope).or_default().extend(imports);
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
