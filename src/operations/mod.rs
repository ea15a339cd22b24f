//! Operations module for the federation pipeline
//!
//! This module provides the high-level operations the CLI runs. Each one
//! stages the store in a [`crate::transaction::Transaction`], runs the
//! pipeline and commits exactly once:
//! - init: batch initialization from a manifest ([`init`])
//! - load_remote: adding one remote to a live import map ([`dynamic`])
//! - remove: dropping a cached remote and regenerating ([`remove`])
//!
//! The operations coordinate with:
//! - Providers: manifest and remote entry fetching (from providers module)
//! - Resolver: ingestion and resolution (from resolver module)
//! - Import map: synthesis (from import_map module)
//! - Browser: receiving the committed map (from providers module)

pub mod dynamic;
pub mod init;
pub mod remove;

use crate::config::Config;
use crate::providers::{Browser, RemoteEntryProvider};
use crate::resolver::ResolveContext;
use crate::store::Storage;
use crate::version::VersionOracle;

pub use dynamic::LoadOptions;

/// Runs pipeline operations against one store and set of collaborators
pub struct Orchestrator<'a, S: Storage> {
    config: &'a Config,
    oracle: &'a dyn VersionOracle,
    storage: &'a mut S,
    entries: &'a dyn RemoteEntryProvider,
    browser: &'a mut dyn Browser,
}

impl<'a, S: Storage> Orchestrator<'a, S> {
    pub fn new(
        config: &'a Config,
        oracle: &'a dyn VersionOracle,
        storage: &'a mut S,
        entries: &'a dyn RemoteEntryProvider,
        browser: &'a mut dyn Browser,
    ) -> Self {
        Self {
            config,
            oracle,
            storage,
            entries,
            browser,
        }
    }

    fn ctx(&self) -> ResolveContext<'a> {
        ResolveContext::new(self.config, self.oracle)
    }
}
