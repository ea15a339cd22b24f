//! Transaction support for atomic pipeline runs
//!
//! A transaction loads the committed store document into a staged
//! [`Registry`]. Ingestion, resolution and synthesis mutate only the staged
//! copy; [`Transaction::commit`] is the single write-through to storage.
//! Dropping a transaction without committing discards the staged state, so a
//! failure anywhere in a pipeline run leaves durable storage untouched.
//!
//! ## Usage
//!
//! ```ignore
//! let mut transaction = Transaction::begin(&mut storage)?;
//!
//! ingest(transaction.registry_mut(), &entries)?;
//! resolve(transaction.registry_mut())?;
//!
//! // On success:
//! transaction.commit()?;
//!
//! // On error the transaction is dropped and nothing is written
//! ```

use tracing::debug;

use crate::error::Result;
use crate::registry::Registry;
use crate::store::Storage;

/// A stage-then-commit transaction over a storage backend
#[derive(Debug)]
pub struct Transaction<'a, S: Storage> {
    /// Durable storage, written only on commit
    storage: &'a mut S,

    /// Staged registry state
    registry: Registry,

    /// Whether the transaction has been committed
    committed: bool,
}

impl<'a, S: Storage> Transaction<'a, S> {
    /// Stage the currently committed state
    pub fn begin(storage: &'a mut S) -> Result<Self> {
        let registry = Registry::from_state(storage.read()?);
        Ok(Self {
            storage,
            registry,
            committed: false,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Write the staged state through to storage
    pub fn commit(mut self) -> Result<()> {
        self.storage.write(self.registry.state())?;
        self.committed = true;
        debug!("Committed registry");
        Ok(())
    }
}

impl<S: Storage> Drop for Transaction<'_, S> {
    fn drop(&mut self) {
        if !self.committed {
            debug!("Discarding staged registry changes");
        }
    }
}
