//! Error types for edward-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from loading, validating or saving a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure, with the path that was being accessed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse error on load — includes file path and line context from serde_json.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error (save path).
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A name is used by more than one entry, or by both a service and a group.
    #[error("names used more than once: {}", names.join(", "))]
    DuplicateName { names: Vec<String> },

    /// A group lists a child that is neither a known service nor a known group.
    #[error("group '{group}' refers to unknown child '{child}'")]
    UnknownChild { group: String, child: String },

    /// A group contains itself, directly or through nested groups.
    #[error("group cycle detected: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },

    /// The file was written by a newer schema than this build understands.
    #[error("config version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A structural problem found while loading a specific file.
    #[error("invalid config at {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: Box<ConfigError>,
    },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.edward/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

/// Convenience constructor for [`ConfigError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
