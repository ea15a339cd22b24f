//! Dynamic loading of a single remote into the live import map

use tracing::{debug, info};

use crate::config::OverrideCachedRemotes;
use crate::domain::ImportMap;
use crate::error::{FederationError, Result};
use crate::import_map::{Synthesizer, remote_import_map};
use crate::resolver::{DynamicResolver, Resolution, enforce};
use crate::store::Storage;
use crate::transaction::Transaction;
use crate::url_utils::join;

use super::Orchestrator;

/// Options for loading a remote
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Name to register the remote under instead of the declared one
    pub name: Option<String>,

    /// Exposed module to import once the map is updated (e.g., "./Button")
    pub module: Option<String>,
}

impl<S: Storage> Orchestrator<'_, S> {
    /// Load one remote entry and layer its imports onto the live map
    pub async fn load_remote(&mut self, url: &str, options: &LoadOptions) -> Result<ImportMap> {
        let ctx = self.ctx();
        let mut transaction = Transaction::begin(&mut *self.storage)?;

        let mut entry = match self.entries.provide(url).await {
            Ok(entry) => entry,
            Err(err) => {
                enforce(ctx.config.strict.remote_entry, err)?;
                return Ok(transaction.registry().import_map().clone());
            }
        };
        if let Some(name) = &options.name {
            entry.name = name.clone();
        }
        if entry.name.is_empty() {
            return Err(FederationError::FetchFailed {
                url: url.to_string(),
                reason: "remote entry declares no name".to_string(),
            });
        }
        if entry.url.is_empty() {
            entry.url = url.to_string();
        }

        let registry = transaction.registry_mut();
        let mut live = registry.import_map().clone();

        if registry.remote(&entry.name).is_some() {
            if ctx.config.profile.skip_cached_remotes.skips(true) {
                info!("Remote '{}' is already cached, skipping", entry.name);
                drop(transaction);
                return self.publish(live, &entry.name, options).await;
            }
            if ctx.config.profile.override_cached_remotes == OverrideCachedRemotes::Always {
                // Whatever the old remote shared passes to the remaining remotes
                debug!("Replacing cached remote '{}'", entry.name);
                registry.remove_remote(&entry.name);
                Resolution::new(ctx).resolve(registry)?;
                live = Synthesizer::new(ctx.config).generate(registry)?;
            }
        }

        let actions = DynamicResolver::new(ctx).resolve_remote(registry, &entry)?;
        live.merge(remote_import_map(registry, &entry.name, &actions)?);
        registry.set_import_map(live.clone());

        transaction.commit()?;
        self.publish(live, &entry.name, options).await
    }

    /// Hand the map to the browser and import the requested module
    async fn publish(
        &mut self,
        import_map: ImportMap,
        remote: &str,
        options: &LoadOptions,
    ) -> Result<ImportMap> {
        self.browser.set_import_map(&import_map)?;

        if let Some(module) = &options.module {
            let specifier = join(remote, module);
            let url = import_map
                .imports
                .get(&specifier)
                .ok_or(FederationError::ModuleNotFound { specifier })?;
            self.browser.import_module(url).await?;
        }
        Ok(import_map)
    }
}
