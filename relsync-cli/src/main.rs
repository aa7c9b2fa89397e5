//! relsync — release download metadata sync.
//!
//! # Usage
//!
//! ```text
//! relsync [--repo <dir>] [--manifest <path>] [--binaries <path>] update [--dry-run]
//! relsync [--repo <dir>] [--manifest <path>] [--binaries <path>] diff
//! ```
//!
//! `--repo`, `--manifest` and `--binaries` fall back to `TARI_WEBSITE_REPO`,
//! `DOWNLOADS_YML_PATH` and `BINARIES_PATH`.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use commands::{diff::DiffArgs, update::UpdateArgs};
use relsync_core::config::{BINARIES_ENV, MANIFEST_ENV, REPO_ENV};
use relsync_core::{Config, ConfigInput};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "relsync",
    version,
    about = "Point download manifest entries at the newest release binaries",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Select the newest binary per channel, checksum it, and rewrite the manifest.
    Update(UpdateArgs),

    /// Show a unified diff of what `update` would write.
    Diff(DiffArgs),
}

// ---------------------------------------------------------------------------
// Shared configuration arguments
// ---------------------------------------------------------------------------

/// Paths and update options shared by every subcommand.
#[derive(Args, Debug)]
struct ConfigArgs {
    /// Website repository root.
    #[arg(long = "repo", env = REPO_ENV, global = true, value_name = "DIR")]
    repo_root: Option<PathBuf>,

    /// Manifest path relative to the repository root [default: _data/downloads.yml].
    #[arg(long, env = MANIFEST_ENV, global = true, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Binaries directory relative to the repository root [default: _binaries].
    #[arg(long, env = BINARIES_ENV, global = true, value_name = "PATH")]
    binaries: Option<PathBuf>,

    /// Prefix for the `download` field [default: binaries].
    #[arg(long, global = true, value_name = "PREFIX")]
    download_prefix: Option<String>,

    /// Additional filter_spec value to leave untouched (repeatable).
    #[arg(long = "exclude", global = true, value_name = "FILTER_SPEC")]
    exclude: Vec<String>,
}

impl From<ConfigArgs> for ConfigInput {
    fn from(a: ConfigArgs) -> Self {
        ConfigInput {
            repo_root: a.repo_root,
            manifest: a.manifest,
            binaries: a.binaries,
            download_prefix: a.download_prefix,
            exclude: a.exclude,
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::resolve(cli.config.into()).context("invalid configuration")?;
    tracing::debug!(
        "manifest: {}, binaries: {}",
        config.manifest_path.display(),
        config.binaries_path.display()
    );

    match cli.command {
        Commands::Update(args) => args.run(&config),
        Commands::Diff(args) => args.run(&config),
    }
}
