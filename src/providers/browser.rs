//! Import map output
//!
//! [`ImportMapWriter`] stands in for the browser: the committed map is
//! written as JSON to a file (or stdout), and "importing" a module prints the
//! URL it resolved to.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ImportMap;
use crate::error::{FederationError, Result};

use super::Browser;

#[derive(Debug, Clone, Default)]
pub struct ImportMapWriter {
    out: Option<PathBuf>,
    loaded: Vec<String>,
}

impl ImportMapWriter {
    /// Write to `out`, or to stdout when `None`
    pub fn new(out: Option<PathBuf>) -> Self {
        Self {
            out,
            loaded: Vec::new(),
        }
    }

    /// Module URLs imported so far
    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }
}

#[async_trait]
impl Browser for ImportMapWriter {
    fn set_import_map(&mut self, import_map: &ImportMap) -> Result<()> {
        let json = import_map.to_json().map_err(|e| FederationError::IoError {
            message: format!("Failed to serialize import map: {e}"),
        })?;

        match &self.out {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, format!("{json}\n"))?;
                info!("Wrote import map to {}", path.display());
            }
            None => println!("{json}"),
        }
        Ok(())
    }

    async fn import_module(&mut self, url: &str) -> Result<()> {
        println!("{url}");
        self.loaded.push(url.to_string());
        Ok(())
    }
}
