use std::path::Path;

use edward_core::{Service, ServiceCommands};

use super::{parse_err, read_manifest, scan_with};
use crate::{dir_name, Backend, DetectError};

/// Node packages with a `start` script.
#[derive(Debug, Clone, Copy, Default)]
pub struct NpmBackend;

impl NpmBackend {
    /// Inspect a single directory.
    pub fn detect(dir: &Path) -> Result<Option<Service>, DetectError> {
        let path = dir.join("package.json");
        let Some(contents) = read_manifest(&path)? else {
            return Ok(None);
        };
        let json: serde_json::Value =
            serde_json::from_str(&contents).map_err(|e| parse_err(path.clone(), e))?;

        let has_start = json
            .get("scripts")
            .and_then(|s| s.get("start"))
            .and_then(|s| s.as_str())
            .is_some();
        if !has_start {
            return Ok(None);
        }

        let name = json
            .get("name")
            .and_then(|n| n.as_str())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .or_else(|| dir_name(dir));
        let Some(name) = name else {
            return Err(parse_err(path, "cannot determine package name"));
        };

        let mut service = Service::new(name)
            .with_path(dir)
            .with_commands(ServiceCommands {
                build: Some("npm install".to_string()),
                launch: Some("npm start".to_string()),
                stop: None,
            });
        service.description = json
            .get("description")
            .and_then(|d| d.as_str())
            .map(str::to_string);
        Ok(Some(service))
    }
}

impl Backend for NpmBackend {
    fn name(&self) -> &'static str {
        "npm"
    }

    fn scan(&self, target: &Path) -> Result<Vec<Service>, DetectError> {
        scan_with(self.name(), target, Self::detect)
    }
}
