//! Init command implementation

use std::path::{Path, PathBuf};

use crate::cli::InitArgs;
use crate::error::Result;
use crate::operations::Orchestrator;
use crate::providers::{FsManifestProvider, FsRemoteEntryProvider, ImportMapWriter};
use crate::version::SemverOracle;

use super::{GlobalArgs, Session};

/// Run init command
pub async fn run(global: &GlobalArgs, args: InitArgs) -> Result<()> {
    let mut session = Session::open(global)?;
    let entries_dir = remote_entries_dir(&session.cwd, &args.manifest);

    let manifests = FsManifestProvider::new(&session.cwd);
    let entries = FsRemoteEntryProvider::new(entries_dir);
    let oracle = SemverOracle::new();
    let mut browser = ImportMapWriter::new(args.out);

    Orchestrator::new(
        &session.config,
        &oracle,
        &mut session.storage,
        &entries,
        &mut browser,
    )
    .init(&manifests, &args.manifest)
    .await?;

    Ok(())
}

/// Relative remote entry URLs resolve against the manifest file's directory
fn remote_entries_dir(cwd: &Path, manifest: &str) -> PathBuf {
    if manifest.trim_start().starts_with('{') {
        return cwd.to_path_buf();
    }
    let path = Path::new(manifest.strip_prefix("file://").unwrap_or(manifest));
    match path.parent() {
        Some(parent) => cwd.join(parent),
        None => cwd.to_path_buf(),
    }
}
