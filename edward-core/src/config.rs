//! Configuration store — load and atomically save `edward.json`.
//!
//! # File layout
//!
//! ```text
//! {
//!   "version": 1,
//!   "imports": [],
//!   "groups":   [ { "name": "...", "children": ["svc", "nested-group"] } ],
//!   "services": [ { "name": "...", "path": "...", "commands": { ... } } ]
//! }
//! ```
//!
//! Group children are stored as one mixed list of names and classified on
//! load. Services and groups are written sorted by name, group children sorted.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, ConfigError};
use crate::types::{Configuration, Group, Service, CONFIG_VERSION};

/// File name used when no explicit config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "edward.json";

// ---------------------------------------------------------------------------
// On-disk representation
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default = "current_version")]
    version: u32,
    #[serde(default)]
    imports: Vec<String>,
    #[serde(default)]
    groups: Vec<GroupFile>,
    #[serde(default)]
    services: Vec<Service>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GroupFile {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    children: Vec<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

fn current_version() -> u32 {
    CONFIG_VERSION
}

impl ConfigFile {
    fn into_configuration(self) -> Result<Configuration, ConfigError> {
        let mut duplicates = Vec::new();

        let mut service_map = BTreeMap::new();
        for service in self.services {
            if service_map.contains_key(&service.name) {
                duplicates.push(service.name.clone());
                continue;
            }
            service_map.insert(service.name.clone(), service);
        }

        let mut group_files = BTreeMap::new();
        for group in self.groups {
            if group_files.contains_key(&group.name) || service_map.contains_key(&group.name) {
                duplicates.push(group.name.clone());
                continue;
            }
            group_files.insert(group.name.clone(), group);
        }

        if !duplicates.is_empty() {
            duplicates.sort();
            duplicates.dedup();
            return Err(ConfigError::DuplicateName { names: duplicates });
        }

        let mut group_map = BTreeMap::new();
        for (name, file) in &group_files {
            let mut group = Group {
                name: name.clone(),
                description: file.description.clone(),
                services: Vec::new(),
                groups: Vec::new(),
                extra: file.extra.clone(),
            };
            for child in &file.children {
                if service_map.contains_key(child) {
                    group.services.push(child.clone());
                } else if group_files.contains_key(child) {
                    group.groups.push(child.clone());
                } else {
                    return Err(ConfigError::UnknownChild {
                        group: name.clone(),
                        child: child.clone(),
                    });
                }
            }
            group_map.insert(name.clone(), group);
        }

        Ok(Configuration {
            version: self.version,
            imports: self.imports,
            service_map,
            group_map,
        })
    }

    fn from_configuration(config: &Configuration) -> Self {
        Self {
            version: config.version,
            imports: config.imports.clone(),
            groups: config
                .group_map
                .values()
                .map(|group| GroupFile {
                    name: group.name.clone(),
                    description: group.description.clone(),
                    children: group.children(),
                    extra: group.extra.clone(),
                })
                .collect(),
            services: config.service_map.values().cloned().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse / render
// ---------------------------------------------------------------------------

/// Parse configuration JSON. `path` is only used for error context.
pub fn parse(contents: &str, path: &Path) -> Result<Configuration, ConfigError> {
    let file: ConfigFile = serde_json::from_str(contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = file.into_configuration().map_err(|e| invalid(path, e))?;
    config.validate().map_err(|e| invalid(path, e))?;
    Ok(config)
}

/// Render a configuration as pretty-printed JSON with a trailing newline.
pub fn render(config: &Configuration) -> Result<String, ConfigError> {
    let mut json = serde_json::to_string_pretty(&ConfigFile::from_configuration(config))?;
    json.push('\n');
    Ok(json)
}

fn invalid(path: &Path, source: ConfigError) -> ConfigError {
    ConfigError::Invalid {
        path: path.to_path_buf(),
        source: Box::new(source),
    }
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load the configuration at `path`.
///
/// A missing file is not an error: an empty configuration stamped with the
/// current schema version is returned instead.
pub fn load(path: &Path) -> Result<Configuration, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Configuration::empty());
        }
        Err(e) => return Err(io_err(path, e)),
    };
    parse(&contents, path)
}

// ---------------------------------------------------------------------------
// Save (atomic)
// ---------------------------------------------------------------------------

/// `<dir>/<file name>.tmp` — always in the same directory as the target so
/// the final rename never crosses a filesystem.
pub fn tmp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
    path.with_file_name(format!("{name}.tmp"))
}

/// Atomically save `config` to `path`.
///
/// Write flow: validate → serialize → `.tmp` sibling → fsync → `rename`.
/// On failure the `.tmp` file is removed and any existing file is untouched.
pub fn save(path: &Path, config: &Configuration) -> Result<(), ConfigError> {
    config.validate()?;
    let json = render(config)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    let tmp = tmp_path(path);
    if let Err(e) = write_synced(&tmp, json.as_bytes()) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<(), ConfigError> {
    let mut file = std::fs::File::create(path).map_err(|e| io_err(path, e))?;
    file.write_all(bytes).map_err(|e| io_err(path, e))?;
    file.sync_all().map_err(|e| io_err(path, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
