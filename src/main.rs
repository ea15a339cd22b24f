//! fedmap - module federation import map generator
//!
//! Reads the remote entries of independently deployed micro-frontends,
//! decides per shared dependency which version is loaded once, which are
//! redundant and which stay isolated, and synthesizes a browser import map.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod import_map;
mod logging;
mod operations;
mod progress;
mod providers;
mod registry;
mod resolver;
mod store;
mod transaction;
mod url_utils;
mod version;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use commands::GlobalArgs;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let global = GlobalArgs {
        store: cli.store,
        config: cli.config,
        strict: cli.strict,
    };

    let result = match cli.command {
        Commands::Init(args) => commands::init::run(&global, args).await,
        Commands::Add(args) => commands::add::run(&global, args).await,
        Commands::Remove(args) => commands::remove::run(&global, args),
        Commands::Show(args) => commands::show::run(&global, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}
