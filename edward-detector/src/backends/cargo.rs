use std::path::Path;

use edward_core::{Service, ServiceCommands};
use serde::Deserialize;

use super::{parse_err, read_manifest, scan_with};
use crate::{Backend, DetectError};

/// Rust binary crates: a `Cargo.toml` with a `[package]` that builds a binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct CargoBackend;

#[derive(Debug, Deserialize)]
struct Manifest {
    package: Option<Package>,
    #[serde(default)]
    bin: Vec<toml::Value>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    description: Option<String>,
}

impl CargoBackend {
    /// Inspect a single directory.
    pub fn detect(dir: &Path) -> Result<Option<Service>, DetectError> {
        let path = dir.join("Cargo.toml");
        let Some(contents) = read_manifest(&path)? else {
            return Ok(None);
        };
        let manifest: Manifest = toml::from_str(&contents).map_err(|e| parse_err(path, e))?;

        // Workspace roots and library-only crates are not runnable.
        let Some(package) = manifest.package else {
            return Ok(None);
        };
        if manifest.bin.is_empty() && !dir.join("src").join("main.rs").is_file() {
            return Ok(None);
        }

        let mut service = Service::new(package.name)
            .with_path(dir)
            .with_commands(ServiceCommands {
                build: Some("cargo build".to_string()),
                launch: Some("cargo run".to_string()),
                stop: None,
            });
        service.description = package.description;
        Ok(Some(service))
    }
}

impl Backend for CargoBackend {
    fn name(&self) -> &'static str {
        "cargo"
    }

    fn scan(&self, target: &Path) -> Result<Vec<Service>, DetectError> {
        scan_with(self.name(), target, Self::detect)
    }
}
