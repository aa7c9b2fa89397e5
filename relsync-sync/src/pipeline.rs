//! Shared update pipeline used by `relsync update` and `relsync diff`.
//!
//! load → (select → checksum → mutate) per channel → serialize → write.
//! Nothing is written unless every channel succeeded.

use relsync_core::{manifest, Config};

use crate::updater::{update_manifest, ChannelOutcome};
use crate::writer::{write_manifest, WriteResult};
use crate::SyncError;

/// Outcome of a full update run.
#[derive(Debug)]
pub struct UpdateReport {
    pub channels: Vec<ChannelOutcome>,
    pub write: WriteResult,
}

/// Load the manifest, update every channel, and return the serialized
/// result without writing it.
pub(crate) fn render_updated(config: &Config) -> Result<(String, Vec<ChannelOutcome>), SyncError> {
    let mut doc = manifest::load_at(&config.manifest_path)?;
    let channels = update_manifest(config, &mut doc)?;
    let rendered = manifest::to_yaml_string(&doc)?;
    Ok((rendered, channels))
}

/// Run the update pipeline and write the manifest (unless `dry_run`).
pub fn run(config: &Config, dry_run: bool) -> Result<UpdateReport, SyncError> {
    let (rendered, channels) = render_updated(config)?;
    let write = write_manifest(&config.manifest_path, &rendered, dry_run)?;
    Ok(UpdateReport { channels, write })
}
