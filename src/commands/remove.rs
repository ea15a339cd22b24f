//! Remove command implementation

use crate::cli::RemoveArgs;
use crate::error::Result;
use crate::operations::Orchestrator;
use crate::providers::{FsRemoteEntryProvider, ImportMapWriter};
use crate::version::SemverOracle;

use super::{GlobalArgs, Session};

/// Run remove command
pub fn run(global: &GlobalArgs, args: RemoveArgs) -> Result<()> {
    let mut session = Session::open(global)?;

    // Removal never fetches
    let entries = FsRemoteEntryProvider::new(&session.cwd);
    let oracle = SemverOracle::new();
    let mut browser = ImportMapWriter::new(args.out);

    Orchestrator::new(
        &session.config,
        &oracle,
        &mut session.storage,
        &entries,
        &mut browser,
    )
    .remove(&args.name)?;

    Ok(())
}
