//! Resolution of dirty shared externals
//!
//! Each dirty external in a non-strict scope gets exactly one `share` version.
//! The canonical version is chosen in this order:
//!
//! 1. a version contributed by the host
//! 2. the highest version, when `latestSharedExternal` is set
//! 3. the version that forces the fewest extra downloads, highest first on ties
//!
//! Every other version becomes `skip`, unless its first ref is strict and its
//! range rejects the canonical tag, in which case it becomes `scope`.

use tracing::{debug, warn};

use crate::domain::{Action, ScopeType, SharedExternal};
use crate::error::{FederationError, Result};
use crate::registry::Registry;

use super::ResolveContext;

pub struct Resolution<'a> {
    ctx: ResolveContext<'a>,
}

impl<'a> Resolution<'a> {
    pub fn new(ctx: ResolveContext<'a>) -> Self {
        Self { ctx }
    }

    /// Resolve every dirty external in every scope
    pub fn resolve(&self, registry: &mut Registry) -> Result<()> {
        for scope in registry.scopes(true) {
            let scope = Some(scope.as_str());
            if registry.scope_type(scope) == ScopeType::Strict {
                continue;
            }

            let mut externals = registry.shared(scope);
            if !externals.values().any(|e| e.dirty) {
                continue;
            }

            for (package, external) in externals.iter_mut().filter(|(_, e)| e.dirty) {
                self.resolve_external(package, external)?;
            }
            registry.set_shared(externals, scope);
        }
        Ok(())
    }

    /// Assign actions to the versions of one external and clear its dirty flag
    pub fn resolve_external(&self, package: &str, external: &mut SharedExternal) -> Result<()> {
        if external.versions.len() <= 1 {
            if let Some(version) = external.versions.first_mut() {
                version.action = Action::Share;
            }
            external.dirty = false;
            return Ok(());
        }

        let shared_index = self.pick_shared(external);
        let shared_tag = external.versions[shared_index].tag.clone();
        debug!("[{}] Sharing version {}", package, shared_tag);

        for (index, version) in external.versions.iter_mut().enumerate() {
            if index == shared_index {
                version.action = Action::Share;
                continue;
            }

            let Some(first) = version.first_ref() else {
                version.action = Action::Skip;
                continue;
            };

            if !first.strict_version
                || self.ctx.oracle.is_compatible(&shared_tag, &first.required_version)
            {
                version.action = Action::Skip;
                continue;
            }

            if self.ctx.config.strict.external_compatibility {
                return Err(FederationError::IncompatibleStrictVersion {
                    remote: first.name.clone(),
                    package: package.to_string(),
                    version: version.tag.clone(),
                    shared_version: shared_tag,
                });
            }

            warn!(
                "[{}][{}] Version {} is incompatible with shared {}, scoping it",
                first.name, package, version.tag, shared_tag
            );
            version.action = Action::Scope;
        }

        external.dirty = false;
        Ok(())
    }

    fn pick_shared(&self, external: &SharedExternal) -> usize {
        if let Some(index) = external.versions.iter().position(|v| v.host) {
            return index;
        }
        if self.ctx.config.profile.latest_shared_external {
            return 0;
        }

        let mut best = (0, usize::MAX);
        for (index, candidate) in external.versions.iter().enumerate() {
            let extra = self.extra_downloads(external, index, &candidate.tag);
            if extra < best.1 {
                best = (index, extra);
            }
        }
        best.0
    }

    /// Versions that would have to be scoped if `tag` were shared
    fn extra_downloads(&self, external: &SharedExternal, shared_index: usize, tag: &str) -> usize {
        external
            .versions
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != shared_index)
            .filter_map(|(_, version)| version.first_ref())
            .filter(|first| {
                !first.cached
                    && first.strict_version
                    && !self.ctx.oracle.is_compatible(tag, &first.required_version)
            })
            .count()
    }
}
