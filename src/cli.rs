//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default store directory
pub const DEFAULT_STORE_DIR: &str = ".fedmap";

/// fedmap - module federation import map generator
///
/// Resolve shared dependencies across micro-frontend remotes and synthesize a browser import map.
#[derive(Parser, Debug)]
#[command(
    name = "fedmap",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Module federation shared dependency resolver and import map generator",
    long_about = "fedmap reads remote entry documents of independently deployed micro-frontends, \
                  decides which version of every shared dependency is loaded once, which are \
                  redundant and which must stay isolated, and writes the resulting browser \
                  import map.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  fedmap init manifest.json --out importmap.json\n    \
                  fedmap add ./mfe3/remoteEntry.json --load ./Button\n    \
                  fedmap remove team/mfe1\n    \
                  fedmap show --externals"
)]
pub struct Cli {
    /// Store directory (defaults to .fedmap)
    #[arg(long, global = true, env = "FEDMAP_STORE", default_value = DEFAULT_STORE_DIR)]
    pub store: PathBuf,

    /// Configuration file (defaults to fedmap.yaml if present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Enable every strict flag
    #[arg(long, global = true)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the import map from a manifest
    Init(InitArgs),

    /// Add one remote to the live import map
    Add(AddArgs),

    /// Remove a cached remote and regenerate the import map
    Remove(RemoveArgs),

    /// Show the live import map or the shared externals
    Show(ShowArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the init command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Initialize from a manifest file:\n    fedmap init manifest.json\n\n\
                   Initialize from an inline manifest:\n    fedmap init '{\"team/mfe1\": \"./mfe1/remoteEntry.json\"}'\n\n\
                   Write the import map to a file:\n    fedmap init manifest.json --out importmap.json\n\n\
                   Fail on any policy violation:\n    fedmap init manifest.json --strict")]
pub struct InitArgs {
    /// Manifest file or inline JSON object (remote name to remote entry URL)
    pub manifest: String,

    /// Write the import map to this file instead of stdout
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}

/// Arguments for the add command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Add a remote:\n    fedmap add ./mfe3/remoteEntry.json\n\n\
                  Add a remote under another name:\n    fedmap add ./mfe3/remoteEntry.json --name team/mfe3\n\n\
                  Add a remote and load an exposed module:\n    fedmap add ./mfe3/remoteEntry.json --load ./Button")]
pub struct AddArgs {
    /// Remote entry location (path or file:// URL)
    pub remote_entry: String,

    /// Register the remote under this name
    #[arg(long)]
    pub name: Option<String>,

    /// Exposed module to load after updating the import map
    #[arg(long, value_name = "MODULE")]
    pub load: Option<String>,

    /// Write the import map to this file instead of stdout
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}

/// Arguments for the remove command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Remove a remote:\n    fedmap remove team/mfe1")]
pub struct RemoveArgs {
    /// Remote name to remove
    pub name: String,

    /// Write the import map to this file instead of stdout
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Print the live import map:\n    fedmap show\n\n\
                  Show shared externals per scope:\n    fedmap show --externals")]
pub struct ShowArgs {
    /// Show shared externals and their actions instead of the import map
    #[arg(long)]
    pub externals: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    fedmap completions bash > ~/.bash_completion.d/fedmap\n\n\
                  Generate zsh completions:\n    fedmap completions zsh > ~/.zfunc/_fedmap\n\n\
                  Generate fish completions:\n    fedmap completions fish > ~/.config/fish/completions/fedmap.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
