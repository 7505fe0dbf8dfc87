//! `edward generate [--force] [--group <name>] [--service <name>]... [TARGET]...`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use edward_generate::{Generator, Outcome};

/// Scan project directories for services and add them to the config.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directories to scan. Defaults to the current directory.
    pub targets: Vec<PathBuf>,

    /// Write without asking for confirmation.
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Add every newly found service to this group, creating it if needed.
    #[arg(long, short = 'g', value_name = "NAME")]
    pub group: Option<String>,

    /// Only consider these services (repeatable).
    #[arg(long = "service", short = 's', value_name = "NAME")]
    pub services: Vec<String>,
}

impl GenerateArgs {
    pub fn run(self, config: &Path) -> Result<()> {
        let mut generator = Generator::new(config);
        let outcome = generator
            .generate(&self.services, self.force, self.group.as_deref(), &self.targets)
            .with_context(|| format!("failed to generate {}", config.display()))?;

        match outcome {
            Outcome::Written(path) => tracing::info!(path = %path.display(), "generate finished"),
            Outcome::Declined => tracing::info!("generate declined"),
            Outcome::NoChanges => tracing::info!("generate found nothing new"),
        }
        Ok(())
    }
}
