//! Removal of a cached remote

use tracing::info;

use crate::domain::ImportMap;
use crate::error::Result;
use crate::import_map::Synthesizer;
use crate::resolver::Resolution;
use crate::store::Storage;
use crate::transaction::Transaction;

use super::Orchestrator;

impl<S: Storage> Orchestrator<'_, S> {
    /// Purge a remote, re-resolve what it touched and regenerate the map
    pub fn remove(&mut self, name: &str) -> Result<ImportMap> {
        let ctx = self.ctx();
        let mut transaction = Transaction::begin(&mut *self.storage)?;

        let registry = transaction.registry_mut();
        registry.require_remote(name)?;
        registry.remove_remote(name);

        Resolution::new(ctx).resolve(registry)?;
        let import_map = Synthesizer::new(ctx.config).generate(registry)?;
        registry.set_import_map(import_map.clone());

        transaction.commit()?;
        self.browser.set_import_map(&import_map)?;

        info!("Removed remote '{}'", name);
        Ok(import_map)
    }
}
