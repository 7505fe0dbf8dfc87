use std::path::Path;

use edward_core::{Service, ServiceCommands};

use super::scan_with;
use crate::{dir_name, io_err, walk, Backend, DetectError};

/// Go commands: a directory holding a `.go` file in `package main`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoBackend;

impl GoBackend {
    /// Inspect a single directory. The service is named after the directory,
    /// matching the binary `go install` produces.
    pub fn detect(dir: &Path) -> Result<Option<Service>, DetectError> {
        let mut is_main = false;
        for file in walk::files_in(dir)? {
            if file.extension().and_then(|e| e.to_str()) != Some("go") {
                continue;
            }
            let bytes = std::fs::read(&file).map_err(|e| io_err(&file, e))?;
            if declares_main(&String::from_utf8_lossy(&bytes)) {
                is_main = true;
                break;
            }
        }
        if !is_main {
            return Ok(None);
        }
        let Some(name) = dir_name(dir) else {
            return Ok(None);
        };

        let launch = name.clone();
        Ok(Some(Service::new(name).with_path(dir).with_commands(
            ServiceCommands {
                build: Some("go install".to_string()),
                launch: Some(launch),
                stop: None,
            },
        )))
    }
}

fn declares_main(source: &str) -> bool {
    source
        .lines()
        .map(str::trim)
        .any(|line| line == "package main" || line.starts_with("package main "))
}

impl Backend for GoBackend {
    fn name(&self) -> &'static str {
        "go"
    }

    fn scan(&self, target: &Path) -> Result<Vec<Service>, DetectError> {
        scan_with(self.name(), target, Self::detect)
    }
}
