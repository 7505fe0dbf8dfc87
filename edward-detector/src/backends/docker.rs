use std::path::Path;

use edward_core::{Service, ServiceCommands};

use super::scan_with;
use crate::{dir_name, Backend, DetectError};

/// Directories with a `Dockerfile`, built and run as an image named after the directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct DockerBackend;

impl DockerBackend {
    pub fn detect(dir: &Path) -> Result<Option<Service>, DetectError> {
        if !dir.join("Dockerfile").is_file() {
            return Ok(None);
        }
        let Some(name) = dir_name(dir) else {
            return Ok(None);
        };
        let commands = ServiceCommands {
            build: Some(format!("docker build -t {name} .")),
            launch: Some(format!("docker run --rm --name {name} {name}")),
            stop: Some(format!("docker stop {name}")),
        };
        Ok(Some(Service::new(name).with_path(dir).with_commands(commands)))
    }
}

impl Backend for DockerBackend {
    fn name(&self) -> &'static str {
        "docker"
    }

    fn scan(&self, target: &Path) -> Result<Vec<Service>, DetectError> {
        scan_with(self.name(), target, Self::detect)
    }
}
