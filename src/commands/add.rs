//! Add command implementation

use crate::cli::AddArgs;
use crate::error::Result;
use crate::operations::{LoadOptions, Orchestrator};
use crate::providers::{FsRemoteEntryProvider, ImportMapWriter};
use crate::version::SemverOracle;

use super::{GlobalArgs, Session};

/// Run add command
pub async fn run(global: &GlobalArgs, args: AddArgs) -> Result<()> {
    let mut session = Session::open(global)?;

    let entries = FsRemoteEntryProvider::new(&session.cwd);
    let oracle = SemverOracle::new();
    let mut browser = ImportMapWriter::new(args.out);
    let options = LoadOptions {
        name: args.name,
        module: args.load,
    };

    Orchestrator::new(
        &session.config,
        &oracle,
        &mut session.storage,
        &entries,
        &mut browser,
    )
    .load_remote(&args.remote_entry, &options)
    .await?;

    Ok(())
}
