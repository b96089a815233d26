//! layered-config: Load and deep-merge application configuration
//!
//! This crate gathers configuration from a prioritized set of sources —
//! explicit file lists, per-application directories, platform config
//! locations, and environment-variable namespaces — and folds them into a
//! single [`ConfigStore`] mapping. Later sources win on conflicting keys;
//! nested mappings are merged recursively rather than replaced.

pub mod error;
pub mod format;
pub mod merge;
pub mod platform;
pub mod store;

pub use error::ConfigError;
pub use format::{ExtensionLoader, FileLoader, Format, SUPPORTED_EXTENSIONS};
pub use merge::deep_merge;
pub use platform::{PlatformDirs, SystemDirs};
pub use store::{ConfigStore, LoadOptions};

/// Value type held by a [`ConfigStore`]: arbitrary scalars or nested
/// mappings, preserving insertion order.
pub use serde_json::{Map, Value};
