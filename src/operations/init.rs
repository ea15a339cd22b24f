//! Batch initialization
//!
//! 1. Get the manifest
//! 2. Fetch the host remote entry (if configured) and every manifest remote concurrently
//! 3. Ingest, resolve and synthesize on the staged registry
//! 4. Commit, then hand the import map to the browser

use futures::future::join_all;
use tracing::{debug, info};

use crate::config::OverrideCachedRemotes;
use crate::domain::{ImportMap, Manifest, RemoteEntry};
use crate::error::Result;
use crate::import_map::Synthesizer;
use crate::progress::FetchProgress;
use crate::providers::{ManifestProvider, RemoteEntryProvider};
use crate::registry::Registry;
use crate::resolver::{Ingestion, Resolution, ResolveContext, enforce};
use crate::store::Storage;
use crate::transaction::Transaction;

use super::Orchestrator;

/// A remote entry to fetch, with the name the caller knows it by
#[derive(Debug, Clone)]
struct FetchTarget {
    name: String,
    url: String,
    host: bool,
}

impl<S: Storage> Orchestrator<'_, S> {
    /// Initialize from a manifest and return the committed import map
    pub async fn init(
        &mut self,
        manifests: &dyn ManifestProvider,
        source: &str,
    ) -> Result<ImportMap> {
        let ctx = self.ctx();
        let manifest = manifests.provide(source).await?;
        debug!("Manifest lists {} remotes", manifest.len());

        let mut transaction = Transaction::begin(&mut *self.storage)?;
        let entries =
            fetch_remote_entries(ctx, transaction.registry(), self.entries, &manifest).await?;

        let registry = transaction.registry_mut();
        Ingestion::new(ctx).ingest(registry, &entries)?;
        Resolution::new(ctx).resolve(registry)?;
        let import_map = Synthesizer::new(ctx.config).generate(registry)?;
        registry.set_import_map(import_map.clone());

        transaction.commit()?;
        self.browser.set_import_map(&import_map)?;

        info!(
            "Initialized {} remotes ({} imports)",
            entries.len(),
            import_map.imports.len()
        );
        Ok(import_map)
    }
}

fn fetch_targets(ctx: ResolveContext<'_>, registry: &Registry, manifest: &Manifest) -> Vec<FetchTarget> {
    let skip_cached = ctx.config.profile.skip_cached_remotes.skips(false);
    let host = ctx.config.host_remote_entry.as_ref().map(|host| FetchTarget {
        name: host.name().to_string(),
        url: host.tagged_url(),
        host: true,
    });
    let remotes = manifest.iter().map(|(name, url)| FetchTarget {
        name: name.clone(),
        url: url.clone(),
        host: false,
    });

    host.into_iter()
        .chain(remotes)
        .filter(|target| {
            let skip = skip_cached && registry.contains_remote(&target.name);
            if skip {
                debug!("Remote '{}' is cached, not fetching", target.name);
            }
            !skip
        })
        .collect()
}

/// Fetch every target concurrently; results keep target order (host first)
async fn fetch_remote_entries(
    ctx: ResolveContext<'_>,
    registry: &Registry,
    provider: &dyn RemoteEntryProvider,
    manifest: &Manifest,
) -> Result<Vec<RemoteEntry>> {
    let targets = fetch_targets(ctx, registry, manifest);

    let progress = FetchProgress::new(targets.len() as u64);
    let fetches = targets.iter().map(|target| {
        let progress = &progress;
        async move {
            let result = provider.provide(&target.url).await;
            progress.fetched(&target.name);
            result
        }
    });
    let results = join_all(fetches).await;
    progress.finish();

    let mut entries = Vec::with_capacity(targets.len());
    for (target, result) in targets.into_iter().zip(results) {
        match result {
            Ok(entry) => entries.push(prepare_entry(ctx, registry, target, entry)),
            Err(err) => enforce(ctx.config.strict.remote_entry, err)?,
        }
    }
    Ok(entries)
}

fn prepare_entry(
    ctx: ResolveContext<'_>,
    registry: &Registry,
    target: FetchTarget,
    mut entry: RemoteEntry,
) -> RemoteEntry {
    if !entry.name.is_empty() && entry.name != target.name {
        debug!(
            "Remote entry declares name '{}', using '{}'",
            entry.name, target.name
        );
    }
    if entry.url.is_empty() {
        entry.url = target.url;
    }
    entry.host = target.host;
    entry.override_cache = registry.contains_remote(&target.name)
        && ctx.config.profile.override_cached_remotes == OverrideCachedRemotes::Always;
    entry.name = target.name;
    entry
}
