//! Error types for edward-generate.

use std::path::PathBuf;

use thiserror::Error;

use edward_core::ConfigError;
use edward_detector::DetectError;

/// All errors that can abort a generate invocation.
///
/// Declining the confirmation prompt is not an error.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Names that collide within one discovery run, with an existing group,
    /// or between the target group and a service. Always sorted.
    #[error("Multiple services or groups were found with the names: {}", .0.join(", "))]
    DuplicateNames(Vec<String>),

    /// A discovery backend failed to scan a target.
    #[error("{backend} discovery failed: {source}")]
    Discovery {
        backend: &'static str,
        #[source]
        source: DetectError,
    },

    /// Loading or saving the configuration failed; surfaced verbatim.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Explicitly requested services that discovery did not find.
    #[error("No services found matching the names: {}", .0.join(", "))]
    ServicesNotFound(Vec<String>),

    /// Reading the answer or writing the transcript failed.
    #[error("I/O error on {stream}: {source}")]
    Stream {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A filesystem path could not be resolved.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn stream_err(stream: &'static str) -> impl FnOnce(std::io::Error) -> GenerateError {
    move |source| GenerateError::Stream { stream, source }
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> GenerateError {
    GenerateError::Io {
        path: path.into(),
        source,
    }
}
