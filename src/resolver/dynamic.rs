//! Inline resolution of a single dynamically loaded remote
//!
//! Unlike batch resolution, nothing already shared is ever re-decided: the
//! new remote's singleton versions are measured against the version each
//! scope currently shares, and the outcome is returned per package so the
//! import map can be patched instead of regenerated.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{Action, RemoteEntry, ScopeType, SharedExternal};
use crate::error::{FederationError, Result};
use crate::registry::{Registry, scope_key};
use crate::url_utils::join;

use super::ResolveContext;
use super::ingest::{Ingestion, MergedShared};

/// Outcome for one singleton declaration of the loaded remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedAction {
    pub action: Action,

    /// File URL an `override` redirects to
    pub override_url: Option<String>,

    /// Share scope of the declaration (`None` for the global scope)
    pub scope: Option<String>,

    /// The remote's own file, relative to its scope URL
    pub file: String,

    pub bundle: Option<String>,
}

/// Outcomes keyed by `(scope key, package name)`
pub type SharedInfoActions = BTreeMap<(String, String), SharedAction>;

pub struct DynamicResolver<'a> {
    ctx: ResolveContext<'a>,
}

impl<'a> DynamicResolver<'a> {
    pub fn new(ctx: ResolveContext<'a>) -> Self {
        Self { ctx }
    }

    /// Ingest `entry` and decide every singleton it declares
    pub fn resolve_remote(
        &self,
        registry: &mut Registry,
        entry: &RemoteEntry,
    ) -> Result<SharedInfoActions> {
        let merged = Ingestion::new(self.ctx).ingest_entry(registry, entry)?;

        let mut actions = SharedInfoActions::new();
        for declared in merged {
            let scope = declared.scope.as_deref();
            let Some(mut external) = registry.shared_external(&declared.package, scope).cloned()
            else {
                continue;
            };

            let Some(action) = self.decide(registry, entry, &declared, &mut external)? else {
                continue;
            };
            debug!(
                "[{}][{}] {} {}",
                entry.name, declared.package, action.action, declared.tag
            );

            external.dirty = false;
            registry.add_or_update_shared(&declared.package, external, scope);
            actions.insert((scope_key(scope).to_string(), declared.package), action);
        }
        Ok(actions)
    }

    fn decide(
        &self,
        registry: &Registry,
        entry: &RemoteEntry,
        declared: &MergedShared,
        external: &mut SharedExternal,
    ) -> Result<Option<SharedAction>> {
        let Some(own_index) = external
            .versions
            .iter()
            .position(|v| v.tag == declared.tag && v.has_remote(&entry.name))
        else {
            return Ok(None);
        };
        let Some(own_ref) = external.versions[own_index]
            .remotes
            .iter()
            .find(|r| r.name == entry.name)
            .cloned()
        else {
            return Ok(None);
        };

        let scope_type = registry.scope_type(declared.scope.as_deref());
        let outcome = |action, override_url| SharedAction {
            action,
            override_url,
            scope: declared.scope.clone(),
            file: own_ref.file.clone(),
            bundle: own_ref.bundle.clone(),
        };

        let shared_index = external.versions.iter().position(|v| v.action == Action::Share);
        let own_is_first = external.versions[own_index]
            .first_ref()
            .is_some_and(|r| r.name == entry.name);

        let use_own = match (scope_type, shared_index) {
            (ScopeType::Strict, _) | (_, None) => Some(Action::Share),
            (_, Some(index)) if index == own_index && own_is_first => Some(Action::Share),
            (_, Some(index)) if index == own_index => None,
            (_, Some(index)) => {
                let shared_tag = &external.versions[index].tag;
                if !own_ref.strict_version
                    || self
                        .ctx
                        .oracle
                        .is_compatible(shared_tag, &own_ref.required_version)
                {
                    None
                } else if self.ctx.config.strict.external_compatibility {
                    return Err(FederationError::IncompatibleStrictVersion {
                        remote: entry.name.clone(),
                        package: declared.package.clone(),
                        version: declared.tag.clone(),
                        shared_version: shared_tag.clone(),
                    });
                } else {
                    Some(Action::Scope)
                }
            }
        };

        if let Some(action) = use_own {
            let version = &mut external.versions[own_index];
            version.action = action;
            set_cached(external, own_index, &entry.name, true);
            return Ok(Some(outcome(action, None)));
        }

        // Follow the currently shared version
        let Some(shared_index) = shared_index else {
            return Ok(None);
        };
        if shared_index != own_index {
            external.versions[own_index].action = Action::Skip;
        }
        set_cached(external, own_index, &entry.name, false);

        if scope_type == ScopeType::Global {
            return Ok(Some(outcome(Action::Skip, None)));
        }

        let Some(target) = external.versions[shared_index].first_ref() else {
            return Ok(None);
        };
        let scope_url = &registry.require_remote(&target.name)?.scope_url;
        Ok(Some(outcome(
            Action::Override,
            Some(join(scope_url, &target.file)),
        )))
    }
}

fn set_cached(external: &mut SharedExternal, index: usize, remote: &str, cached: bool) {
    for remote_ref in external.versions[index]
        .remotes
        .iter_mut()
        .filter(|r| r.name == remote)
    {
        remote_ref.cached = cached;
    }
}
