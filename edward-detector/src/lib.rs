//! Service discovery backends for `edward-detector`.
//!
//! Each [`Backend`] walks a target directory and proposes the services it
//! recognizes. Backends know nothing about the persisted configuration or
//! about each other; reconciling their proposals is the caller's job.
//!
//! [`default_backends`] returns the built-in backends in registration order.

use std::path::{Path, PathBuf};

use edward_core::Service;
use thiserror::Error;

pub mod backends;
pub mod walk;

pub use backends::{CargoBackend, DockerBackend, GoBackend, NpmBackend};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Errors from a backend scan.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> DetectError {
    DetectError::Io {
        path: path.into(),
        source,
    }
}

/// A pluggable scanner that proposes candidate services under a directory.
pub trait Backend: Send + Sync {
    /// Short identifier used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Scan `target` and everything beneath it.
    fn scan(&self, target: &Path) -> Result<Vec<Service>, DetectError>;
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The built-in backends, in the order they are consulted.
pub fn default_backends() -> Vec<Box<dyn Backend>> {
    vec![
        Box::new(CargoBackend),
        Box::new(NpmBackend),
        Box::new(GoBackend),
        Box::new(DockerBackend),
    ]
}

/// Final path component of `dir` as a service name.
pub(crate) fn dir_name(dir: &Path) -> Option<String> {
    dir.file_name().map(|n| n.to_string_lossy().into_owned())
}
