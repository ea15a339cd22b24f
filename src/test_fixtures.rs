//! Test fixtures for reducing test setup duplication.
//!
//! Builders for registry records and remote entries with sensible defaults,
//! so a test only spells out the fields it is about.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{remote_ref, shared_version};
//!
//! let version = shared_version("1.2.3", Action::Share, &[remote_ref("team/mfe1")]);
//! ```

use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;

use crate::domain::{
    Action, ExposedModule, ImportMap, Manifest, RemoteEntry, RemoteInfo, RemoteRef, SharedInfo,
    SharedVersion,
};
use crate::error::{FederationError, Result};
use crate::providers::{Browser, ManifestProvider, RemoteEntryProvider};

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Create test files in a directory.
///
/// Takes a list of (path, content) tuples relative to the temp directory.
///
/// # Panics
///
/// Panics if any file cannot be created.
pub fn create_test_files(temp: &TempDir, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = temp.path().join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&full_path, content).expect("Failed to write test file");
    }
}

/// Remote info without exposed modules
pub fn remote_info(scope_url: &str) -> RemoteInfo {
    RemoteInfo {
        scope_url: scope_url.to_string(),
        exposes: vec![],
    }
}

/// Non-strict ref to `dep-a.js` requiring `~1.2.1`
pub fn remote_ref(name: &str) -> RemoteRef {
    remote_ref_with(name, "dep-a.js", "~1.2.1", false)
}

pub fn remote_ref_with(name: &str, file: &str, required: &str, strict: bool) -> RemoteRef {
    RemoteRef {
        name: name.to_string(),
        file: file.to_string(),
        required_version: required.to_string(),
        strict_version: strict,
        cached: false,
        bundle: None,
    }
}

/// Non-host version record
pub fn shared_version(tag: &str, action: Action, remotes: &[RemoteRef]) -> SharedVersion {
    SharedVersion {
        tag: tag.to_string(),
        host: false,
        action,
        remotes: remotes.to_vec(),
    }
}

/// Singleton, non-strict shared declaration with file `<package>.js`
pub fn shared_info(package: &str, version: Option<&str>, required: &str) -> SharedInfo {
    SharedInfo {
        package_name: package.to_string(),
        version: version.map(ToString::to_string),
        required_version: required.to_string(),
        strict_version: false,
        singleton: true,
        out_file_name: format!("{package}.js"),
        share_scope: None,
        bundle: None,
    }
}

/// Remote entry without exposes or shared declarations
pub fn remote_entry(name: &str, url: &str) -> RemoteEntry {
    RemoteEntry {
        name: name.to_string(),
        url: url.to_string(),
        ..RemoteEntry::default()
    }
}

/// Exposed module declaration
pub fn exposed(key: &str, file: &str) -> ExposedModule {
    ExposedModule {
        key: key.to_string(),
        out_file_name: file.to_string(),
    }
}

/// Manifest provider returning a fixed manifest for any source
pub struct StaticManifest(pub Manifest);

#[async_trait]
impl ManifestProvider for StaticManifest {
    async fn provide(&self, _source: &str) -> Result<Manifest> {
        Ok(self.0.clone())
    }
}

/// Remote entry provider serving entries by URL; unknown URLs fail to fetch
#[derive(Default)]
pub struct StaticEntries(pub BTreeMap<String, RemoteEntry>);

impl StaticEntries {
    /// Serve every entry at its own `url`
    pub fn of(entries: &[RemoteEntry]) -> Self {
        Self(
            entries
                .iter()
                .map(|e| (e.url.clone(), e.clone()))
                .collect(),
        )
    }
}

#[async_trait]
impl RemoteEntryProvider for StaticEntries {
    async fn provide(&self, url: &str) -> Result<RemoteEntry> {
        self.0
            .get(url)
            .cloned()
            .ok_or_else(|| FederationError::FetchFailed {
                url: url.to_string(),
                reason: "not found".to_string(),
            })
    }
}

/// Browser that records every import map and module load
#[derive(Default)]
pub struct RecordingBrowser {
    pub maps: Vec<ImportMap>,
    pub loaded: Vec<String>,
}

#[async_trait]
impl Browser for RecordingBrowser {
    fn set_import_map(&mut self, import_map: &ImportMap) -> Result<()> {
        self.maps.push(import_map.clone());
        Ok(())
    }

    async fn import_module(&mut self, url: &str) -> Result<()> {
        self.loaded.push(url.to_string());
        Ok(())
    }
}

/// Manifest from `(name, url)` pairs
pub fn manifest(pairs: &[(&str, &str)]) -> Manifest {
    pairs
        .iter()
        .map(|(name, url)| (name.to_string(), url.to_string()))
        .collect()
}

/// Shared in-memory sink for formatted log events
#[derive(Clone, Default)]
struct LogSink(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if let Ok(mut buf) = self.0.lock() {
            buf.extend_from_slice(data);
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with every event down to DEBUG captured, returning its result and the log text
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let sink = LogSink::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(sink.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = sink.0.lock().map(|buf| String::from_utf8_lossy(&buf).into_owned());
    (result, logs.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_temp_dir() {
        let temp = create_temp_dir();
        assert!(temp.path().exists());
    }

    #[test]
    fn test_create_test_files() {
        let temp = create_temp_dir();
        create_test_files(&temp, &[("mfe1/remoteEntry.json", "{}")]);
        assert!(temp.path().join("mfe1/remoteEntry.json").exists());
    }

    #[test]
    fn test_capture_logs() {
        let (value, logs) = capture_logs(|| {
            tracing::debug!("captured at debug");
            7
        });
        assert_eq!(value, 7);
        assert!(logs.contains("captured at debug"));
    }
}
