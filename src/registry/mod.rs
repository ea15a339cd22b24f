//! External registry
//!
//! The registry is the staged, in-memory copy of the store document that
//! ingestion, resolution and synthesis read and mutate. It never touches
//! durable storage: a [`crate::transaction::Transaction`] loads it and is the
//! only thing that writes it back.
//!
//! The contract has four parallel parts:
//! - shared externals, keyed by scope then package name
//! - scoped externals, keyed by remote name then package name
//! - remote infos, keyed by remote name
//! - chunk lists, keyed by remote name then bundle name

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{
    GLOBAL_SCOPE, ImportMap, RemoteInfo, STRICT_SCOPE, ScopeType, ScopedExternal, SharedExternal,
};
use crate::error::{FederationError, Result};
use crate::store::StoreState;

/// Shared externals of one scope, keyed by package name
pub type SharedExternals = BTreeMap<String, SharedExternal>;

/// Staged registry state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    state: StoreState,
}

/// Scope key for an optional scope name
pub fn scope_key(scope: Option<&str>) -> &str {
    scope.unwrap_or(GLOBAL_SCOPE)
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: StoreState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    // Shared externals

    /// Shared externals of a scope (empty if the scope is unknown)
    pub fn shared(&self, scope: Option<&str>) -> SharedExternals {
        self.state
            .shared_externals
            .get(scope_key(scope))
            .cloned()
            .unwrap_or_default()
    }

    /// One shared external of a scope
    pub fn shared_external(&self, name: &str, scope: Option<&str>) -> Option<&SharedExternal> {
        self.state
            .shared_externals
            .get(scope_key(scope))
            .and_then(|externals| externals.get(name))
    }

    /// Replace all shared externals of a scope
    pub fn set_shared(&mut self, externals: SharedExternals, scope: Option<&str>) {
        self.state
            .shared_externals
            .insert(scope_key(scope).to_string(), externals);
    }

    /// Insert or replace one shared external in a scope
    pub fn add_or_update_shared(
        &mut self,
        name: impl Into<String>,
        external: SharedExternal,
        scope: Option<&str>,
    ) {
        self.state
            .shared_externals
            .entry(scope_key(scope).to_string())
            .or_default()
            .insert(name.into(), external);
    }

    /// Scope keys, optionally including the global scope
    pub fn scopes(&self, include_global: bool) -> Vec<String> {
        self.state
            .shared_externals
            .keys()
            .filter(|key| include_global || key.as_str() != GLOBAL_SCOPE)
            .cloned()
            .collect()
    }

    /// Resolution policy of a scope
    pub fn scope_type(&self, scope: Option<&str>) -> ScopeType {
        match scope_key(scope) {
            GLOBAL_SCOPE => ScopeType::Global,
            STRICT_SCOPE => ScopeType::Strict,
            _ => ScopeType::ShareScope,
        }
    }

    /// Remove a remote's refs from every scope.
    ///
    /// Externals that lost a ref are marked dirty (unless in the strict scope);
    /// externals left without versions are dropped.
    pub fn remove_from_all_scopes(&mut self, remote_name: &str) {
        for (scope, externals) in &mut self.state.shared_externals {
            let strict = scope == STRICT_SCOPE;
            for external in externals.values_mut() {
                if external.remove_remote(remote_name) && !strict {
                    external.dirty = true;
                }
            }
            externals.retain(|_, external| !external.versions.is_empty());
        }
        self.state
            .shared_externals
            .retain(|_, externals| !externals.is_empty());
    }

    // Remote infos

    pub fn remote(&self, name: &str) -> Option<&RemoteInfo> {
        self.state.remotes.get(name)
    }

    /// Remote info or `UnknownRemote`
    pub fn require_remote(&self, name: &str) -> Result<&RemoteInfo> {
        self.remote(name)
            .ok_or_else(|| FederationError::UnknownRemote {
                name: name.to_string(),
            })
    }

    pub fn contains_remote(&self, name: &str) -> bool {
        self.state.remotes.contains_key(name)
    }

    pub fn remotes(&self) -> &BTreeMap<String, RemoteInfo> {
        &self.state.remotes
    }

    pub fn add_or_update_remote(&mut self, name: impl Into<String>, info: RemoteInfo) {
        self.state.remotes.insert(name.into(), info);
    }

    // Scoped externals

    pub fn scoped_externals(&self) -> &BTreeMap<String, BTreeMap<String, ScopedExternal>> {
        &self.state.scoped_externals
    }

    pub fn scoped_externals_of(&self, remote_name: &str) -> BTreeMap<String, ScopedExternal> {
        self.state
            .scoped_externals
            .get(remote_name)
            .cloned()
            .unwrap_or_default()
    }

    pub fn add_or_update_scoped(
        &mut self,
        remote_name: impl Into<String>,
        package: impl Into<String>,
        external: ScopedExternal,
    ) {
        self.state
            .scoped_externals
            .entry(remote_name.into())
            .or_default()
            .insert(package.into(), external);
    }

    // Chunks

    /// Chunk files of one bundle of a remote (empty if unknown)
    pub fn chunks(&self, remote_name: &str, bundle: &str) -> &[String] {
        self.state
            .chunks
            .get(remote_name)
            .and_then(|bundles| bundles.get(bundle))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn add_or_update_chunks(
        &mut self,
        remote_name: impl Into<String>,
        bundle: impl Into<String>,
        files: Vec<String>,
    ) {
        self.state
            .chunks
            .entry(remote_name.into())
            .or_default()
            .insert(bundle.into(), files);
    }

    // Import map

    /// Live (last synthesized) import map
    pub fn import_map(&self) -> &ImportMap {
        &self.state.import_map
    }

    pub fn set_import_map(&mut self, import_map: ImportMap) {
        self.state.import_map = import_map;
    }

    /// Purge every cached contribution of a remote from all registries
    pub fn remove_remote(&mut self, remote_name: &str) {
        debug!("Purging cached state of remote '{}'", remote_name);
        self.state.remotes.remove(remote_name);
        self.state.scoped_externals.remove(remote_name);
        self.state.chunks.remove(remote_name);
        self.remove_from_all_scopes(remote_name);
    }
}
