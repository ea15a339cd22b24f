//! Command implementations for the fedmap CLI

pub mod add;
pub mod completions;
pub mod init;
pub mod remove;
pub mod show;
pub mod version;

use std::path::{Path, PathBuf};

use crate::config::{Config, StrictFlags};
use crate::error::Result;
use crate::store::{JsonFileStorage, StoreGuard};

/// Options shared by every store-backed command
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub store: PathBuf,
    pub config: Option<PathBuf>,
    pub strict: bool,
}

/// Configuration and locked storage for one command run
///
/// The store lock is held until the session is dropped.
pub struct Session {
    pub config: Config,
    pub storage: JsonFileStorage,
    pub cwd: PathBuf,
    _guard: StoreGuard,
}

impl Session {
    pub fn open(global: &GlobalArgs) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let config = load_config(global, &cwd)?;
        let store_dir = cwd.join(&global.store);
        let guard = StoreGuard::acquire(&store_dir)?;

        Ok(Self {
            config,
            storage: JsonFileStorage::new(&store_dir),
            cwd,
            _guard: guard,
        })
    }
}

/// Load the configuration file and apply `--strict`
pub fn load_config(global: &GlobalArgs, cwd: &Path) -> Result<Config> {
    let mut config = Config::load(global.config.as_deref(), cwd)?;
    if global.strict {
        config.strict = StrictFlags::all();
    }
    Ok(config)
}
