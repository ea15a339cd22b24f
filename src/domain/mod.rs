//! Domain models for fedmap
//!
//! This module contains pure domain objects: the incoming remote entry
//! documents, the persisted external registry records, and the import map.
//! These types carry no I/O and only serde derives.

pub mod external;
pub mod import_map;
pub mod remote_entry;

pub use external::{
    Action, RemoteInfo, RemoteModule, RemoteRef, ScopeType, ScopedExternal, SharedExternal,
    SharedVersion,
};
pub use import_map::ImportMap;
pub use remote_entry::{ExposedModule, Manifest, RemoteEntry, SharedInfo};

/// Scope key of the default share scope
pub const GLOBAL_SCOPE: &str = "__GLOBAL__";

/// Scope key of the strict share scope
pub const STRICT_SCOPE: &str = "strict";

/// Bundle name reserved for chunks of a remote's exposed modules
pub const EXPOSED_BUNDLE: &str = "mapping-or-exposed";

/// Default name of the host remote entry
pub const HOST_REMOTE_NAME: &str = "__NF-HOST__";
