//! # edward-generate
//!
//! Discovery, reconciliation and confirmation for `edward generate`.
//!
//! [`Generator::generate`] runs the whole pipeline; the stages are public so
//! callers and tests can drive them individually:
//! [`discover`] → [`reconcile`] → [`confirm`] → [`Delta::apply`].

pub mod confirm;
pub mod discovery;
pub mod error;
pub mod generator;
pub mod reconcile;

pub use confirm::confirm;
pub use discovery::{discover, DiscoveryResult};
pub use error::GenerateError;
pub use generator::{Generator, Outcome};
pub use reconcile::{reconcile, Delta, GroupChange};
