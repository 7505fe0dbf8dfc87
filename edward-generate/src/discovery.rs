//! Discovery aggregation: run every backend over every target.

use std::collections::BTreeSet;
use std::path::PathBuf;

use edward_core::Service;
use edward_detector::Backend;

use crate::error::GenerateError;

/// Candidate services proposed by one discovery run, sorted by name.
///
/// Byte-identical proposals (the same directory reached through overlapping
/// targets) are collapsed; distinct proposals sharing a name are kept so the
/// conflict can be reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveryResult {
    services: Vec<Service>,
}

impl DiscoveryResult {
    pub fn new(services: Vec<Service>) -> Self {
        let mut unique: Vec<Service> = Vec::with_capacity(services.len());
        for service in services {
            if !unique.contains(&service) {
                unique.push(service);
            }
        }
        unique.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
        Self { services: unique }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Names proposed more than once with different descriptors, sorted.
    pub fn duplicate_names(&self) -> Vec<String> {
        self.services
            .windows(2)
            .filter(|pair| pair[0].name == pair[1].name)
            .map(|pair| pair[0].name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Keep only candidates named in `names`. An empty list keeps everything.
    ///
    /// Requested names that match nothing fail with
    /// [`GenerateError::ServicesNotFound`].
    pub fn filter_services(self, names: &[String]) -> Result<Self, GenerateError> {
        if names.is_empty() {
            return Ok(self);
        }
        let wanted: BTreeSet<&str> = names.iter().map(String::as_str).collect();
        let missing: Vec<String> = wanted
            .iter()
            .filter(|name| !self.services.iter().any(|s| s.name == **name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(GenerateError::ServicesNotFound(missing));
        }
        let services = self
            .services
            .into_iter()
            .filter(|s| wanted.contains(s.name.as_str()))
            .collect();
        Ok(Self { services })
    }
}

/// Invoke every backend against every target and aggregate the results.
///
/// An empty `targets` list scans the current directory. The first backend
/// failure aborts the whole run.
pub fn discover(
    backends: &[Box<dyn Backend>],
    targets: &[PathBuf],
) -> Result<DiscoveryResult, GenerateError> {
    let default_target = [PathBuf::from(".")];
    let targets = if targets.is_empty() {
        &default_target[..]
    } else {
        targets
    };

    let mut candidates = Vec::new();
    for target in targets {
        for backend in backends {
            let found = backend
                .scan(target)
                .map_err(|source| GenerateError::Discovery {
                    backend: backend.name(),
                    source,
                })?;
            tracing::debug!(
                backend = backend.name(),
                target = %target.display(),
                count = found.len(),
                "scan complete"
            );
            candidates.extend(found);
        }
    }
    Ok(DiscoveryResult::new(candidates))
}
