//! Full import map synthesis from the registry
//!
//! ## Steps
//!
//! 1. Scoped (non-singleton) externals, under their remote's scope
//! 2. Share scopes: every contributing remote is pointed at one file
//! 3. The global scope: the shared version becomes a top-level import
//! 4. Exposed modules, as `<remote>/<module>` top-level imports
//! 5. Chunk imports of every bundle touched above
//!
//! Synthesis also writes back the `cached` flag of every ref, so later
//! resolutions know which files are already in the map.

use tracing::{debug, warn};

use crate::config::Config;
use crate::domain::{
    Action, EXPOSED_BUNDLE, GLOBAL_SCOPE, ImportMap, RemoteRef, ScopeType, SharedExternal,
};
use crate::error::{FederationError, Result};
use crate::registry::Registry;
use crate::url_utils::join;

use super::chunks::{self, Bundles};

/// Builds import maps from a resolved registry
pub struct Synthesizer<'a> {
    config: &'a Config,
}

/// Map under construction plus the bundles it touched
#[derive(Default)]
struct Build {
    map: ImportMap,
    bundles: Bundles,
}

impl<'a> Synthesizer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Generate the complete import map.
    ///
    /// Any failure is reported as `ImportMapFailed` with the cause attached.
    pub fn generate(&self, registry: &mut Registry) -> Result<ImportMap> {
        self.build(registry)
            .map_err(FederationError::import_map_failed)
    }

    fn build(&self, registry: &mut Registry) -> Result<ImportMap> {
        let mut build = Build::default();

        self.add_scoped_externals(&mut build, registry)?;

        for scope in registry.scopes(false) {
            self.add_share_scope(&mut build, registry, &scope)?;
        }
        self.add_global_scope(&mut build, registry)?;
        self.add_exposed_modules(&mut build, registry);

        chunks::add_chunk_imports(&mut build.map, registry, &build.bundles)?;
        Ok(build.map)
    }

    fn add_scoped_externals(&self, build: &mut Build, registry: &Registry) -> Result<()> {
        for (remote, externals) in registry.scoped_externals() {
            let scope_url = &registry.require_remote(remote)?.scope_url;
            for (package, external) in externals {
                build
                    .map
                    .add_scoped(scope_url, package, join(scope_url, &external.file));
                chunks::register(&mut build.bundles, remote, external.bundle.as_deref());
            }
        }
        Ok(())
    }

    fn add_share_scope(&self, build: &mut Build, registry: &mut Registry, scope: &str) -> Result<()> {
        let strict = registry.scope_type(Some(scope)) == ScopeType::Strict;

        for (package, mut external) in registry.shared(Some(scope)) {
            if strict {
                for index in 0..external.versions.len() {
                    share_to_contributors(build, registry, &mut external, index, index, &package)?;
                }
            } else {
                self.resolve_share_scope(build, registry, scope, &package, &mut external)?;
            }
            registry.add_or_update_shared(&package, external, Some(scope));
        }
        Ok(())
    }

    fn resolve_share_scope(
        &self,
        build: &mut Build,
        registry: &Registry,
        scope: &str,
        package: &str,
        external: &mut SharedExternal,
    ) -> Result<()> {
        let shared = external.shared_indices();

        for index in 0..external.versions.len() {
            let action = external.versions[index].action;
            match action {
                Action::Scope => {
                    scope_to_own(build, registry, &mut external.versions[index].remotes, package)?
                }
                Action::Share => share_to_contributors(build, registry, external, index, index, package)?,
                Action::Skip | Action::Override => match shared.as_slice() {
                    [] => {
                        if self.config.strict.import_map {
                            return Err(FederationError::MissingOverride {
                                scope: scope.to_string(),
                                package: package.to_string(),
                            });
                        }
                        debug!("[{scope}][{package}] no override version, scoping override versions");
                        scope_to_own(build, registry, &mut external.versions[index].remotes, package)?;
                    }
                    [target, rest @ ..] => {
                        if !rest.is_empty() {
                            self.ambiguous_share(scope, package)?;
                        }
                        share_to_contributors(build, registry, external, *target, index, package)?;
                    }
                },
            }
        }
        Ok(())
    }

    fn add_global_scope(&self, build: &mut Build, registry: &mut Registry) -> Result<()> {
        for (package, mut external) in registry.shared(None) {
            for version in &mut external.versions {
                let action = version.action;
                match action {
                    Action::Skip | Action::Override => {}
                    Action::Scope => scope_to_own(build, registry, &mut version.remotes, &package)?,
                    Action::Share => {
                        if build.map.has_import(&package) {
                            self.ambiguous_share(GLOBAL_SCOPE, &package)?;
                            continue;
                        }
                        let Some(first) = version.remotes.first_mut() else {
                            continue;
                        };
                        let scope_url = &registry.require_remote(&first.name)?.scope_url;
                        build.map.add_import(&package, join(scope_url, &first.file));
                        first.cached = true;
                        chunks::register(&mut build.bundles, &first.name, first.bundle.as_deref());
                    }
                }
            }
            registry.add_or_update_shared(&package, external, None);
        }
        Ok(())
    }

    fn add_exposed_modules(&self, build: &mut Build, registry: &Registry) {
        for (remote, info) in registry.remotes() {
            for module in &info.exposes {
                build.map.add_import(
                    join(remote, &module.module_name),
                    join(&info.scope_url, &module.file),
                );
            }
            chunks::register(&mut build.bundles, remote, Some(EXPOSED_BUNDLE));
        }
    }

    /// Multiple shared versions where one is expected
    fn ambiguous_share(&self, scope: &str, package: &str) -> Result<()> {
        let err = FederationError::AmbiguousShare {
            scope: scope.to_string(),
            package: package.to_string(),
        };
        if self.config.strict.import_map {
            return Err(err);
        }
        warn!("{}, using the first", err);
        Ok(())
    }
}

/// Point every ref at its own file under its own scope
fn scope_to_own(
    build: &mut Build,
    registry: &Registry,
    remotes: &mut [RemoteRef],
    package: &str,
) -> Result<()> {
    for remote_ref in remotes {
        let scope_url = &registry.require_remote(&remote_ref.name)?.scope_url;
        build
            .map
            .add_scoped(scope_url, package, join(scope_url, &remote_ref.file));
        remote_ref.cached = true;
        chunks::register(&mut build.bundles, &remote_ref.name, remote_ref.bundle.as_deref());
    }
    Ok(())
}

/// Point every ref of version `from` at the first ref's file of version `target`
fn share_to_contributors(
    build: &mut Build,
    registry: &Registry,
    external: &mut SharedExternal,
    target: usize,
    from: usize,
    package: &str,
) -> Result<()> {
    let Some(owner) = external.versions[target].first_ref() else {
        return Ok(());
    };
    let url = join(&registry.require_remote(&owner.name)?.scope_url, &owner.file);
    chunks::register(&mut build.bundles, &owner.name, owner.bundle.as_deref());

    for remote_ref in &mut external.versions[from].remotes {
        let scope_url = &registry.require_remote(&remote_ref.name)?.scope_url;
        build.map.add_scoped(scope_url, package, &url);
        remote_ref.cached = false;
    }
    if let Some(owner) = external.versions[target].remotes.first_mut() {
        owner.cached = true;
    }
    Ok(())
}
