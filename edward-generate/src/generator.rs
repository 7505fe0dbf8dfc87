//! Generate orchestration.
//!
//! ## `generate` — stage order
//!
//! 1. Discover candidate services with every backend over every target.
//! 2. Narrow to explicitly requested services, if any.
//! 3. Load the configuration (missing file = empty config).
//! 4. Reconcile into a [`Delta`].
//! 5. Confirm over the injected streams (or skip with `force`).
//! 6. Apply the delta and save atomically.
//! 7. Report `Wrote to: <absolute path>` (not canonicalized).
//!
//! The first error aborts the run; nothing is saved unless stage 6 is reached.

use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use edward_core::config;
use edward_detector::{default_backends, Backend};

use crate::confirm::confirm;
use crate::discovery::discover;
use crate::error::{io_err, stream_err, GenerateError};
use crate::reconcile::{reconcile, Delta};

/// Result of a successful generate invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing new was found; the configuration was not touched.
    NoChanges,
    /// The change summary was shown and not accepted.
    Declined,
    /// The merged configuration was written to this absolute path.
    Written(PathBuf),
}

/// Owns the collaborators of one or more generate invocations.
pub struct Generator {
    config_path: PathBuf,
    backends: Vec<Box<dyn Backend>>,
    input: Box<dyn BufRead + Send>,
    output: Box<dyn Write + Send>,
}

impl Generator {
    /// A generator for `config_path` using the built-in backends and the
    /// process's stdin/stdout.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            backends: default_backends(),
            input: Box::new(BufReader::new(io::stdin())),
            output: Box::new(io::stdout()),
        }
    }

    pub fn with_backends(mut self, backends: Vec<Box<dyn Backend>>) -> Self {
        self.backends = backends;
        self
    }

    pub fn with_input(mut self, input: impl BufRead + Send + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    pub fn with_output(mut self, output: impl Write + Send + 'static) -> Self {
        self.output = Box::new(output);
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Discover services under `targets` and merge them into the configuration.
    ///
    /// `services` restricts which discovered candidates are considered (empty
    /// = all); `group` names a group that receives every newly added service.
    pub fn generate(
        &mut self,
        services: &[String],
        force: bool,
        group: Option<&str>,
        targets: &[PathBuf],
    ) -> Result<Outcome, GenerateError> {
        let discovered = discover(&self.backends, targets)?.filter_services(services)?;
        let mut cfg = config::load(&self.config_path)?;
        let mut delta: Delta = reconcile(&cfg, &discovered, group)?;

        if !confirm(&delta, force, &mut self.output, &mut self.input)? {
            return Ok(if delta.is_empty() {
                Outcome::NoChanges
            } else {
                Outcome::Declined
            });
        }

        let written = absolute(&self.config_path)?;
        if let Some(base) = written.parent() {
            delta.relativize_paths(&canonical_or_self(base));
        }
        let added = delta.new_services.len();
        delta.apply(&mut cfg);
        config::save(&written, &cfg)?;
        tracing::info!(path = %written.display(), added, "wrote config");

        writeln!(self.output, "Wrote to: {}", written.display()).map_err(stream_err("output"))?;
        self.output.flush().map_err(stream_err("output"))?;
        Ok(Outcome::Written(written))
    }
}

/// `path` joined onto the current directory when relative; never resolved
/// further, so symlinked locations are reported as given.
fn absolute(path: &Path) -> Result<PathBuf, GenerateError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()
        .map_err(|e| io_err(path, e))?
        .join(path))
}

fn canonical_or_self(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
