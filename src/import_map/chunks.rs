//! Chunk imports
//!
//! Every bundle a synthesized entry belongs to pulls in that bundle's chunk
//! files as `@nf-internal/<file stem>` imports. Shared bundles are scoped to
//! the scope URL of the remote that registered the chunks; the exposed
//! bundle is scoped to a synthetic base named after the remote.

use std::collections::BTreeSet;

use crate::domain::{EXPOSED_BUNDLE, ImportMap};
use crate::error::Result;
use crate::registry::Registry;
use crate::url_utils::{file_stem, join};

/// Specifier namespace of chunk imports
pub const CHUNK_NAMESPACE: &str = "@nf-internal";

/// `(remote name, bundle name)` pairs that contributed to a map
pub type Bundles = BTreeSet<(String, String)>;

/// Specifier of a chunk file (`chunk-ABC.js` becomes `@nf-internal/chunk-ABC`)
pub fn chunk_specifier(file: &str) -> String {
    format!("{CHUNK_NAMESPACE}/{}", file_stem(file))
}

/// Scope key of chunk imports pulled in by a remote's exposed modules
pub fn exposed_chunk_base(remote: &str) -> String {
    format!("{CHUNK_NAMESPACE}/{remote}/")
}

/// Record a bundle if the entry declares one
pub fn register(bundles: &mut Bundles, remote: &str, bundle: Option<&str>) {
    if let Some(bundle) = bundle {
        bundles.insert((remote.to_string(), bundle.to_string()));
    }
}

/// Add the chunk imports of every registered bundle
pub fn add_chunk_imports(map: &mut ImportMap, registry: &Registry, bundles: &Bundles) -> Result<()> {
    for (remote, bundle) in bundles {
        let files = registry.chunks(remote, bundle);
        if files.is_empty() {
            continue;
        }
        let scope_url = &registry.require_remote(remote)?.scope_url;
        let base = if bundle == EXPOSED_BUNDLE {
            exposed_chunk_base(remote)
        } else {
            scope_url.clone()
        };
        for file in files {
            map.add_scoped(&base, chunk_specifier(file), join(scope_url, file));
        }
    }
    Ok(())
}
