//! Error taxonomy for configuration loading

use crate::format::Format;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by loading, decoding, or slicing configuration.
///
/// A missing file is never an error: `load` logs and skips it. Everything
/// below propagates to the caller.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A found file is malformed for its declared extension.
    #[error("failed to parse {} as {format}: {source}", path.display())]
    Parse {
        path: PathBuf,
        format: Format,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The file extension is outside the supported set.
    #[error("unsupported config file extension: {}", path.display())]
    UnsupportedExtension { path: PathBuf },

    /// The file decoded successfully but its top level is not a mapping.
    #[error("top level of {} is not a mapping", path.display())]
    NotAMapping { path: PathBuf },

    /// `sub_configuration` was invoked on a key holding a non-mapping value.
    #[error("cannot extract sub-configuration for namespace `{namespace}`")]
    Namespace { namespace: String },
}
