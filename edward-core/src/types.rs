//! Domain types for an edward configuration.
//!
//! Services and groups share one namespace: a name may denote a service or a
//! group, never both. All name-keyed collections are `BTreeMap`s so iteration
//! order is always ascending lexical order.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Schema version stamped on every configuration this build writes.
pub const CONFIG_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Commands used to build, launch and stop a service. Opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceCommands {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<String>,
}

impl ServiceCommands {
    pub fn is_empty(&self) -> bool {
        self.build.is_none() && self.launch.is_none() && self.stop.is_none()
    }
}

/// A named, independently runnable unit.
///
/// Identity is by `name` only. Everything else is a descriptor supplied by
/// the discovery backend that proposed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    /// Working directory of the service. Relative paths are resolved against
    /// the directory holding the configuration file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "ServiceCommands::is_empty")]
    pub commands: ServiceCommands,
    /// Fields this crate does not interpret, kept so load/save is lossless.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            description: None,
            commands: ServiceCommands::default(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_commands(mut self, commands: ServiceCommands) -> Self {
        self.commands = commands;
        self
    }

    /// Rewrite an absolute `path` beneath `base` as a path relative to it.
    pub fn relativize(&mut self, base: &Path) {
        let Some(path) = self.path.as_ref().filter(|p| p.is_absolute()) else {
            return;
        };
        if let Ok(relative) = path.strip_prefix(base) {
            self.path = Some(if relative.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                relative.to_path_buf()
            });
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// A named container of services and nested groups, referenced by name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub name: String,
    pub description: Option<String>,
    /// Child service names.
    pub services: Vec<String>,
    /// Child group names.
    pub groups: Vec<String>,
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// All child names, services and groups together, sorted.
    pub fn children(&self) -> Vec<String> {
        let mut children: Vec<String> = self
            .services
            .iter()
            .chain(self.groups.iter())
            .cloned()
            .collect();
        children.sort();
        children.dedup();
        children
    }

    /// Append services not already listed, keeping the list sorted.
    pub fn add_services<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.services.extend(names);
        self.services.sort();
        self.services.dedup();
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// The persisted aggregate of services and groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub version: u32,
    /// Other configuration files pulled into this one. Preserved as-is.
    pub imports: Vec<String>,
    pub service_map: BTreeMap<String, Service>,
    pub group_map: BTreeMap<String, Group>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::empty()
    }
}

impl Configuration {
    /// An empty configuration stamped with [`CONFIG_VERSION`].
    pub fn empty() -> Self {
        Self {
            version: CONFIG_VERSION,
            imports: Vec::new(),
            service_map: BTreeMap::new(),
            group_map: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.service_map.is_empty() && self.group_map.is_empty()
    }

    /// Sorted service names.
    pub fn service_names(&self) -> Vec<&str> {
        self.service_map.keys().map(String::as_str).collect()
    }

    /// Sorted group names.
    pub fn group_names(&self) -> Vec<&str> {
        self.group_map.keys().map(String::as_str).collect()
    }

    /// Check every structural invariant: disjoint namespaces, resolvable
    /// children of the right kind, and an acyclic group graph.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version > CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: CONFIG_VERSION,
            });
        }

        let shared: Vec<String> = self
            .service_map
            .keys()
            .filter(|name| self.group_map.contains_key(*name))
            .cloned()
            .collect();
        if !shared.is_empty() {
            return Err(ConfigError::DuplicateName { names: shared });
        }

        for group in self.group_map.values() {
            for child in &group.services {
                if !self.service_map.contains_key(child) {
                    return Err(ConfigError::UnknownChild {
                        group: group.name.clone(),
                        child: child.clone(),
                    });
                }
            }
            for child in &group.groups {
                if !self.group_map.contains_key(child) {
                    return Err(ConfigError::UnknownChild {
                        group: group.name.clone(),
                        child: child.clone(),
                    });
                }
            }
        }

        self.check_acyclic()
    }

    fn check_acyclic(&self) -> Result<(), ConfigError> {
        // Depth-first search with an explicit "on stack" set; `done` holds
        // groups whose whole subtree has already been cleared.
        let mut done: BTreeSet<&str> = BTreeSet::new();
        for root in self.group_map.keys() {
            let mut on_stack: Vec<&str> = Vec::new();
            self.visit(root, &mut on_stack, &mut done)?;
        }
        Ok(())
    }

    fn visit<'a>(
        &'a self,
        name: &'a str,
        on_stack: &mut Vec<&'a str>,
        done: &mut BTreeSet<&'a str>,
    ) -> Result<(), ConfigError> {
        if done.contains(name) {
            return Ok(());
        }
        if let Some(pos) = on_stack.iter().position(|n| *n == name) {
            let mut path: Vec<String> = on_stack[pos..].iter().map(|n| n.to_string()).collect();
            path.push(name.to_string());
            return Err(ConfigError::Cycle { path });
        }
        on_stack.push(name);
        if let Some(group) = self.group_map.get(name) {
            for child in &group.groups {
                self.visit(child, on_stack, done)?;
            }
        }
        on_stack.pop();
        done.insert(name);
        Ok(())
    }

    /// Rewrite absolute service paths beneath `base` as paths relative to it.
    pub fn relativize_paths(&mut self, base: &Path) {
        for service in self.service_map.values_mut() {
            service.relativize(base);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
