//! `relsync update` — point every channel at its newest binary.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use relsync_core::Config;
use relsync_sync::{
    pipeline::{self, UpdateReport},
    ChannelOutcome, WriteResult,
};

/// Arguments for `relsync update`.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Show what would be written without touching the manifest.
    #[arg(long)]
    pub dry_run: bool,
}

impl UpdateArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let report = pipeline::run(config, self.dry_run).with_context(|| {
            format!("update failed for '{}'", config.manifest_path.display())
        })?;
        print_report(&report, self.dry_run);
        Ok(())
    }
}

fn print_report(report: &UpdateReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let changed = report.channels.iter().filter(|c| c.is_changed()).count();
    let skipped = report
        .channels
        .iter()
        .filter(|c| matches!(c, ChannelOutcome::Skipped { .. }))
        .count();

    let verb = match &report.write {
        WriteResult::Written { .. } => "updated",
        WriteResult::WouldWrite { .. } => "would update",
        WriteResult::Unchanged { .. } => "already current",
    };
    println!(
        "{prefix}{} {} {verb} ({changed} changed, {skipped} skipped)",
        "✓".green(),
        report.write.path().display()
    );

    for outcome in &report.channels {
        match outcome {
            ChannelOutcome::Updated {
                channel,
                download,
                changed: true,
                ..
            } => println!("  {}  {channel}: {download}", "✎".yellow()),
            ChannelOutcome::Updated {
                channel, download, ..
            } => println!("  ·  {channel}: {download}"),
            ChannelOutcome::Skipped { channel, .. } => {
                println!("  {}  {channel}: excluded", "-".dimmed())
            }
        }
    }
}
