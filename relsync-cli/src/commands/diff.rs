//! `relsync diff` — show the unified diff `update` would apply.

use anyhow::{Context, Result};
use clap::Args;

use relsync_core::Config;
use relsync_sync::diff_manifest;

/// Arguments for `relsync diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {}

impl DiffArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let result = diff_manifest(config)
            .with_context(|| format!("diff failed for '{}'", config.manifest_path.display()))?;

        if result.is_empty() {
            println!("No differences for '{}'.", result.path.display());
            return Ok(());
        }

        print!("{}", result.unified_diff);
        if !result.unified_diff.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}
