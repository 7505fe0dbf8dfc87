//! edward core library — domain types, configuration persistence, errors.
//!
//! - [`types`] — services, groups and the configuration aggregate
//! - [`config`] — load / atomic save of `edward.json`
//! - [`paths`] — home directory layout and initialization
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod paths;
pub mod types;

pub use error::ConfigError;
pub use types::{Configuration, Group, Service, ServiceCommands, CONFIG_VERSION};
