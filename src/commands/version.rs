//! Version command implementation

use crate::config::CONFIG_FILE;
use crate::error::Result;
use crate::store::STORE_FILE;

/// Run version command
pub fn run() -> Result<()> {
    print!("{}", version_info());
    Ok(())
}

fn version_info() -> String {
    let profile = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };

    format!(
        "fedmap {}\n\nBuild info:\n  Minimum Rust version: {}\n  Profile: {profile}\n\nFiles:\n  Config: {CONFIG_FILE}\n  Store: {STORE_FILE}\n",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_RUST_VERSION"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        let info = version_info();
        assert!(info.starts_with(&format!("fedmap {}\n", env!("CARGO_PKG_VERSION"))));
        assert!(info.contains("Build info:"));
        assert!(info.contains("Config: fedmap.yaml"));
        assert!(info.contains("Store: store.json"));
    }
}
