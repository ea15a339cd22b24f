//! Import map synthesis
//!
//! - [`synthesize`] regenerates the complete map from a resolved registry
//! - [`dynamic`] builds the partial map of one dynamically loaded remote
//! - [`chunks`] adds `@nf-internal/*` chunk imports for touched bundles

pub mod chunks;
pub mod dynamic;
pub mod synthesize;

pub use dynamic::remote_import_map;
pub use synthesize::Synthesizer;
