//! Well-known locations under the edward home directory.
//!
//! ```text
//! ~/.edward/
//!   logs/
//! ```
//!
//! Nothing in the engine consults these implicitly: the caller runs
//! [`initialize_at`] once and passes any path it needs explicitly.

use std::path::{Path, PathBuf};

use crate::error::{io_err, ConfigError};

pub fn edward_root(home: &Path) -> PathBuf {
    home.join(".edward")
}

pub fn logs_dir(home: &Path) -> PathBuf {
    edward_root(home).join("logs")
}

/// Create `<home>/.edward/` and its subdirectories (mode `0700`) if missing.
///
/// Returns the edward root. Safe to call repeatedly.
pub fn initialize_at(home: &Path) -> Result<PathBuf, ConfigError> {
    let root = edward_root(home);
    for dir in [root.clone(), logs_dir(home)] {
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
            set_dir_permissions(&dir)?;
        }
    }
    Ok(root)
}

/// `initialize_at` convenience wrapper — uses `dirs::home_dir()`.
pub fn initialize() -> Result<PathBuf, ConfigError> {
    initialize_at(&home()?)
}

pub fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}
