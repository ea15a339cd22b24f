//! Shared dependency resolution
//!
//! This module handles:
//! - Ingesting remote entries into the staged registry ([`ingest`])
//! - Merging singleton declarations into a scope's versions ([`merge`])
//! - Picking the canonical version per scope and classifying the rest ([`resolution`])
//! - Resolving a single remote inline for dynamic loading ([`dynamic`])
//!
//! Nothing here performs I/O or awaits; every step mutates the staged
//! [`crate::registry::Registry`] synchronously.

pub mod dynamic;
pub mod ingest;
pub mod merge;
pub mod resolution;

use tracing::warn;

use crate::config::Config;
use crate::error::{FederationError, Result};
use crate::version::VersionOracle;

pub use dynamic::{DynamicResolver, SharedAction, SharedInfoActions};
pub use ingest::Ingestion;
pub use resolution::Resolution;

/// Policy and capabilities every resolution step reads
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub config: &'a Config,
    pub oracle: &'a dyn VersionOracle,
}

impl<'a> ResolveContext<'a> {
    pub fn new(config: &'a Config, oracle: &'a dyn VersionOracle) -> Self {
        Self { config, oracle }
    }
}

/// Fail under a strict flag, warn and continue otherwise
pub fn enforce(strict: bool, err: FederationError) -> Result<()> {
    if strict {
        return Err(err);
    }
    warn!("{}", err);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enforce() {
        let err = || FederationError::UnknownRemote {
            name: "team/mfe1".to_string(),
        };
        assert!(enforce(false, err()).is_ok());
        assert!(enforce(true, err()).is_err());
    }
}
