//! edward — discover local services and keep `edward.json` in step with them.
//!
//! # Usage
//!
//! ```text
//! edward [--config <file>] [-v...] generate [--force] [--group <name>] [--service <name>]... [TARGET]...
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use commands::generate::GenerateArgs;
use edward_core::{config::DEFAULT_CONFIG_FILE, paths};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "edward",
    version,
    about = "Define, discover and manage local development services",
    long_about = None,
)]
struct Cli {
    /// Configuration file to read and update.
    #[arg(long, short = 'c', global = true, env = "EDWARD_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins.
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan project directories for services and add them to the config.
    Generate(GenerateArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let home = paths::home().context("could not determine home directory")?;
    paths::initialize_at(&home)
        .with_context(|| format!("failed to initialize {}", paths::edward_root(&home).display()))?;

    match cli.command {
        Commands::Generate(args) => args.run(&cli.config),
    }
}

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Logs go to stderr; stdout carries the interactive transcript.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
