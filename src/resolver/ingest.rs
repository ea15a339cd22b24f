//! Ingestion of remote entries into the staged registry

use tracing::{debug, warn};

use crate::domain::{RemoteEntry, RemoteInfo, RemoteModule, ScopedExternal, SharedInfo};
use crate::error::{FederationError, Result};
use crate::registry::Registry;
use crate::url_utils::scope_url_of;
use crate::version::range::strip_v;

use super::merge::merge_shared;
use super::{ResolveContext, enforce};

/// A singleton declaration that was merged into a scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedShared {
    pub scope: Option<String>,
    pub package: String,
    pub tag: String,
}

/// Folds remote entries into the registry
pub struct Ingestion<'a> {
    ctx: ResolveContext<'a>,
}

impl<'a> Ingestion<'a> {
    pub fn new(ctx: ResolveContext<'a>) -> Self {
        Self { ctx }
    }

    /// Ingest entries in order; the first error aborts the batch
    pub fn ingest(&self, registry: &mut Registry, entries: &[RemoteEntry]) -> Result<()> {
        for entry in entries {
            self.ingest_entry(registry, entry)?;
        }
        Ok(())
    }

    /// Ingest one entry, returning the singleton declarations it merged
    pub fn ingest_entry(
        &self,
        registry: &mut Registry,
        entry: &RemoteEntry,
    ) -> Result<Vec<MergedShared>> {
        if entry.override_cache {
            registry.remove_remote(&entry.name);
        }

        registry.add_or_update_remote(
            &entry.name,
            RemoteInfo {
                scope_url: scope_url_of(&entry.url),
                exposes: entry
                    .exposes
                    .iter()
                    .map(|e| RemoteModule {
                        module_name: e.key.clone(),
                        file: e.out_file_name.clone(),
                    })
                    .collect(),
            },
        );

        let mut merged = Vec::new();
        for shared in &entry.shared {
            let Some(tag) = self.version_tag(entry, shared)? else {
                continue;
            };

            if !shared.singleton {
                registry.add_or_update_scoped(
                    &entry.name,
                    &shared.package_name,
                    ScopedExternal {
                        tag,
                        file: shared.out_file_name.clone(),
                        bundle: shared.bundle.clone(),
                    },
                );
                continue;
            }

            merge_shared(self.ctx, registry, entry, shared, &tag)?;
            merged.push(MergedShared {
                scope: shared.share_scope.clone(),
                package: shared.package_name.clone(),
                tag,
            });
        }

        if let Some(chunks) = &entry.chunks {
            for (bundle, files) in chunks {
                registry.add_or_update_chunks(&entry.name, bundle, files.clone());
            }
        }

        debug!(
            "Ingested remote '{}' ({} shared, {} exposed)",
            entry.name,
            entry.shared.len(),
            entry.exposes.len()
        );
        Ok(merged)
    }

    /// Declared version, or the lowest version the required range admits.
    ///
    /// `None` means the declaration is dropped.
    fn version_tag(&self, entry: &RemoteEntry, shared: &SharedInfo) -> Result<Option<String>> {
        if let Some(version) = shared.version.as_deref() {
            if self.ctx.oracle.is_valid_semver(version) {
                return Ok(Some(strip_v(version).to_string()));
            }
        }

        enforce(
            self.ctx.config.strict.external_version,
            FederationError::InvalidVersion {
                remote: entry.name.clone(),
                package: shared.package_name.clone(),
                version: shared
                    .version
                    .clone()
                    .unwrap_or_else(|| "<missing>".to_string()),
            },
        )?;

        match self.ctx.oracle.smallest_version(&shared.required_version) {
            Some(tag) => {
                debug!(
                    "[{}][{}] Using {} from required range '{}'",
                    entry.name, shared.package_name, tag, shared.required_version
                );
                Ok(Some(tag))
            }
            None => {
                warn!(
                    "[{}][{}] No version satisfies '{}', ignoring declaration",
                    entry.name, shared.package_name, shared.required_version
                );
                Ok(None)
            }
        }
    }
}
