//! Common test utilities for fedmap integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Remote entry of team/mfe1: shares dep-a 1.2.3 and exposes ./wc-comp-a
pub const MFE1_ENTRY: &str = r#"{
  "name": "team/mfe1",
  "url": "http://my.service/mfe1/remoteEntry.json",
  "exposes": [{ "key": "./wc-comp-a", "outFileName": "component-a.js" }],
  "shared": [{
    "packageName": "dep-a",
    "version": "1.2.3",
    "requiredVersion": "~1.2.1",
    "singleton": true,
    "outFileName": "dep-a.js"
  }]
}"#;

/// Remote entry of team/mfe2: shares dep-a 1.2.1 and exposes ./wc-comp-b
pub const MFE2_ENTRY: &str = r#"{
  "name": "team/mfe2",
  "url": "http://my.service/mfe2/remoteEntry.json",
  "exposes": [{ "key": "./wc-comp-b", "outFileName": "component-b.js" }],
  "shared": [{
    "packageName": "dep-a",
    "version": "1.2.1",
    "requiredVersion": "~1.2.1",
    "singleton": true,
    "outFileName": "dep-a.js"
  }]
}"#;

/// Remote entry of team/mfe3: shares dep-a 1.2.2 and exposes ./wc-comp-c
pub const MFE3_ENTRY: &str = r#"{
  "name": "team/mfe3",
  "url": "http://my.service/mfe3/remoteEntry.json",
  "exposes": [{ "key": "./wc-comp-c", "outFileName": "component-c.js" }],
  "shared": [{
    "packageName": "dep-a",
    "version": "1.2.2",
    "requiredVersion": "~1.2.1",
    "singleton": true,
    "outFileName": "dep-a.js"
  }]
}"#;

/// Manifest listing mfe1 and mfe2
pub const MANIFEST: &str = r#"{
  "team/mfe1": "mfe1/remoteEntry.json",
  "team/mfe2": "mfe2/remoteEntry.json"
}"#;

/// A temporary working directory for one sequence of fedmap invocations
pub struct TestWorkspace {
    pub temp: TempDir,
    pub path: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Workspace with mfe1, mfe2 and mfe3 remote entries and a manifest of mfe1 and mfe2
    pub fn with_remotes() -> Self {
        let workspace = Self::new();
        workspace.write_file("mfe1/remoteEntry.json", MFE1_ENTRY);
        workspace.write_file("mfe2/remoteEntry.json", MFE2_ENTRY);
        workspace.write_file("mfe3/remoteEntry.json", MFE3_ENTRY);
        workspace.write_file("manifest.json", MANIFEST);
        workspace
    }

    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Parse a JSON file in the workspace
    pub fn read_json(&self, path: &str) -> serde_json::Value {
        serde_json::from_str(&self.read_file(path)).expect("Failed to parse JSON")
    }

    /// The committed store document
    pub fn store(&self) -> serde_json::Value {
        self.read_json(".fedmap/store.json")
    }

    /// fedmap running inside this workspace with the default log filter
    pub fn fedmap(&self) -> Command {
        let mut cmd = fedmap_cmd();
        cmd.current_dir(&self.path)
            .env_remove("RUST_LOG")
            .env_remove("FEDMAP_STORE");
        cmd
    }

    /// Run `fedmap init manifest.json --out importmap.json` and return the map
    pub fn init(&self) -> serde_json::Value {
        self.fedmap()
            .args(["init", "manifest.json", "--out", "importmap.json"])
            .assert()
            .success();
        self.read_json("importmap.json")
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn fedmap_cmd() -> Command {
    Command::cargo_bin("fedmap").expect("fedmap binary not built")
}
