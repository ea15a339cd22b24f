//! Error types and handling for fedmap
//!
//! Uses `thiserror` for error definitions and `miette` for diagnostic codes.
//! Policy failures (strict flags) and internal-consistency failures share
//! one error type so every pipeline step can bail out with `?` before commit.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for fedmap operations
#[derive(Error, Diagnostic, Debug)]
pub enum FederationError {
    // Version errors
    #[error("Invalid version '{version}' for shared external '{package}' of remote '{remote}'")]
    #[diagnostic(
        code(fedmap::version::invalid),
        help("Shared externals must declare a valid semver version, or disable strict.externalVersion")
    )]
    InvalidVersion {
        remote: String,
        package: String,
        version: String,
    },

    #[error(
        "Remote '{remote}' requires '{package}@{required}' but version {tag} is already cached with range '{cached_required}'"
    )]
    #[diagnostic(code(fedmap::version::range_conflict))]
    VersionRangeConflict {
        remote: String,
        package: String,
        tag: String,
        required: String,
        cached_required: String,
    },

    #[error(
        "Shared external '{package}' of remote '{remote}' requires strict version {version} which is incompatible with shared version {shared_version}"
    )]
    #[diagnostic(
        code(fedmap::version::incompatible_strict),
        help("Align the required ranges or disable strict.externalCompatibility to scope the version instead")
    )]
    IncompatibleStrictVersion {
        remote: String,
        package: String,
        version: String,
        shared_version: String,
    },

    // Import map errors
    #[error("Could not create import map")]
    #[diagnostic(code(fedmap::import_map::failed))]
    ImportMapFailed {
        #[source]
        cause: Box<FederationError>,
    },

    #[error("[{scope}][{package}] shareScope external has no override version")]
    #[diagnostic(code(fedmap::import_map::missing_override))]
    MissingOverride { scope: String, package: String },

    #[error("[{scope}][{package}] shareScope external has multiple shared versions")]
    #[diagnostic(code(fedmap::import_map::ambiguous_share))]
    AmbiguousShare { scope: String, package: String },

    #[error("Remote name '{name}' not found in cache")]
    #[diagnostic(code(fedmap::registry::unknown_remote))]
    UnknownRemote { name: String },

    #[error("Module '{specifier}' is not in the import map")]
    #[diagnostic(code(fedmap::import_map::module_not_found))]
    ModuleNotFound { specifier: String },

    // Fetch errors
    #[error("Failed to fetch '{url}': {reason}")]
    #[diagnostic(
        code(fedmap::fetch::failed),
        help("Check that the remote entry exists, or disable strict.remoteEntry to skip failing remotes")
    )]
    FetchFailed { url: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(fedmap::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(fedmap::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(fedmap::config::invalid))]
    ConfigInvalid { message: String },

    // Store errors
    #[error("Failed to read store: {path}: {reason}")]
    #[diagnostic(code(fedmap::store::read_failed))]
    StoreReadFailed { path: String, reason: String },

    #[error("Failed to write store: {path}: {reason}")]
    #[diagnostic(code(fedmap::store::write_failed))]
    StoreWriteFailed { path: String, reason: String },

    #[error("Store already locked by another process")]
    #[diagnostic(
        code(fedmap::store::locked),
        help("Wait for the other fedmap process to finish or remove the lock file manually")
    )]
    StoreLocked,

    // CLI errors
    #[error("Unsupported shell: {shell}")]
    #[diagnostic(
        code(fedmap::cli::unsupported_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnsupportedShell { shell: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(fedmap::fs::io_error))]
    IoError { message: String },
}

impl FederationError {
    /// Wrap an error as the cause of a failed import map generation
    pub fn import_map_failed(cause: FederationError) -> Self {
        match cause {
            already @ FederationError::ImportMapFailed { .. } => already,
            other => FederationError::ImportMapFailed {
                cause: Box::new(other),
            },
        }
    }
}

impl From<std::io::Error> for FederationError {
    fn from(err: std::io::Error) -> Self {
        FederationError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for FederationError {
    fn from(err: serde_yaml::Error) -> Self {
        FederationError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FederationError {
    fn from(err: serde_json::Error) -> Self {
        FederationError::StoreReadFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, FederationError>;
