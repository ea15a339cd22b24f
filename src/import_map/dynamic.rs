//! Partial import map for one dynamically loaded remote

use crate::domain::{Action, EXPOSED_BUNDLE, ImportMap};
use crate::error::{FederationError, Result};
use crate::registry::Registry;
use crate::resolver::SharedInfoActions;
use crate::url_utils::join;

use super::chunks::{self, Bundles};

/// Build the imports a single remote adds to the live map.
///
/// The result only contains entries for `remote`; layer it on the live map
/// with [`ImportMap::merge`].
pub fn remote_import_map(
    registry: &Registry,
    remote: &str,
    actions: &SharedInfoActions,
) -> Result<ImportMap> {
    build(registry, remote, actions).map_err(FederationError::import_map_failed)
}

fn build(registry: &Registry, remote: &str, actions: &SharedInfoActions) -> Result<ImportMap> {
    let info = registry.require_remote(remote)?;
    let scope_url = info.scope_url.as_str();
    let mut map = ImportMap::new();
    let mut bundles = Bundles::new();

    for (package, external) in registry.scoped_externals_of(remote) {
        map.add_scoped(scope_url, &package, join(scope_url, &external.file));
        chunks::register(&mut bundles, remote, external.bundle.as_deref());
    }

    for ((_, package), shared) in actions {
        let own_url = join(scope_url, &shared.file);
        match (shared.action, shared.scope.is_some()) {
            (Action::Share, false) => map.add_import(package, own_url),
            (Action::Share | Action::Scope, _) => map.add_scoped(scope_url, package, own_url),
            (Action::Skip, false) => continue,
            (Action::Skip | Action::Override, _) => {
                let url = shared.override_url.clone().unwrap_or(own_url);
                map.add_scoped(scope_url, package, url);
                continue;
            }
        }
        chunks::register(&mut bundles, remote, shared.bundle.as_deref());
    }

    for module in &info.exposes {
        map.add_import(join(remote, &module.module_name), join(scope_url, &module.file));
    }
    chunks::register(&mut bundles, remote, Some(EXPOSED_BUNDLE));

    chunks::add_chunk_imports(&mut map, registry, &bundles)?;
    Ok(map)
}
