//! Built-in discovery backends, one per technology.

mod cargo;
mod docker;
mod go;
mod npm;

pub use cargo::CargoBackend;
pub use docker::DockerBackend;
pub use go::GoBackend;
pub use npm::NpmBackend;

use std::path::{Path, PathBuf};

use edward_core::Service;

use crate::{walk, DetectError};

/// Walk `target` and run `detect` on every directory, collecting hits.
pub(crate) fn scan_with<F>(
    backend: &'static str,
    target: &Path,
    detect: F,
) -> Result<Vec<Service>, DetectError>
where
    F: Fn(&Path) -> Result<Option<Service>, DetectError>,
{
    let mut found = Vec::new();
    for dir in walk::project_dirs(target)? {
        if let Some(service) = detect(&dir)? {
            tracing::debug!(backend, service = %service.name, path = %dir.display(), "found service");
            found.push(service);
        }
    }
    Ok(found)
}

pub(crate) fn read_manifest(path: &Path) -> Result<Option<String>, DetectError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(crate::io_err(path, e)),
    }
}

pub(crate) fn parse_err(path: PathBuf, message: impl ToString) -> DetectError {
    DetectError::Parse {
        path,
        message: message.to_string(),
    }
}
