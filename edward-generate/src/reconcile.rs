//! Reconciliation of discovered services against a loaded configuration.
//!
//! Identity is by name: a candidate whose name is already a service in the
//! configuration is considered represented and produces no change, so
//! re-running discovery over an unchanged tree yields an empty [`Delta`].

use std::collections::BTreeSet;
use std::path::Path;

use edward_core::{Configuration, Group, Service};

use crate::discovery::DiscoveryResult;
use crate::error::GenerateError;

/// How the target group changes, if one was requested.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupChange {
    /// The group does not exist yet; create it with these services.
    Create { name: String, services: Vec<String> },
    /// The group exists; append these services to its children.
    Extend { name: String, services: Vec<String> },
}

impl GroupChange {
    pub fn name(&self) -> &str {
        match self {
            GroupChange::Create { name, .. } | GroupChange::Extend { name, .. } => name,
        }
    }
}

/// The additions needed to bring a configuration in line with discovery.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delta {
    /// Services to add, sorted by name.
    pub new_services: Vec<Service>,
    pub group: Option<GroupChange>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.new_services.is_empty() && self.group.is_none()
    }

    /// Names of the services to add, sorted.
    pub fn service_names(&self) -> Vec<&str> {
        self.new_services.iter().map(|s| s.name.as_str()).collect()
    }

    /// Rewrite absolute paths of the new services relative to `base`.
    pub fn relativize_paths(&mut self, base: &Path) {
        for service in &mut self.new_services {
            service.relativize(base);
        }
    }

    /// Merge this delta into `config`. Existing entries are never modified
    /// except for appending children to the target group.
    pub fn apply(self, config: &mut Configuration) {
        for service in self.new_services {
            config
                .service_map
                .entry(service.name.clone())
                .or_insert(service);
        }
        match self.group {
            Some(GroupChange::Create { name, services })
            | Some(GroupChange::Extend { name, services }) => {
                config
                    .group_map
                    .entry(name.clone())
                    .or_insert_with(|| Group::new(name))
                    .add_services(services);
            }
            None => {}
        }
    }
}

/// Compute the [`Delta`] between `existing` and `discovered`.
///
/// Fails with [`GenerateError::DuplicateNames`] when discovery proposed the
/// same name twice, when a candidate's name is already an existing group, or
/// when `target_group` names a service. All offending names are reported
/// together, sorted.
pub fn reconcile(
    existing: &Configuration,
    discovered: &DiscoveryResult,
    target_group: Option<&str>,
) -> Result<Delta, GenerateError> {
    let mut conflicts: BTreeSet<String> = discovered.duplicate_names().into_iter().collect();
    for candidate in discovered.services() {
        if existing.group_map.contains_key(&candidate.name) {
            conflicts.insert(candidate.name.clone());
        }
    }
    if let Some(group) = target_group {
        let is_service = existing.service_map.contains_key(group)
            || discovered.services().iter().any(|s| s.name == group);
        if is_service {
            conflicts.insert(group.to_string());
        }
    }
    if !conflicts.is_empty() {
        return Err(GenerateError::DuplicateNames(conflicts.into_iter().collect()));
    }

    let new_services: Vec<Service> = discovered
        .services()
        .iter()
        .filter(|candidate| !existing.service_map.contains_key(&candidate.name))
        .cloned()
        .collect();

    let group = match target_group {
        Some(_) if new_services.is_empty() => None,
        Some(name) => {
            let services = new_services.iter().map(|s| s.name.clone()).collect();
            Some(if existing.group_map.contains_key(name) {
                GroupChange::Extend {
                    name: name.to_string(),
                    services,
                }
            } else {
                GroupChange::Create {
                    name: name.to_string(),
                    services,
                }
            })
        }
        None => None,
    };

    tracing::debug!(
        new_services = new_services.len(),
        group = group.as_ref().map(GroupChange::name).unwrap_or("-"),
        "reconciled"
    );
    Ok(Delta {
        new_services,
        group,
    })
}
