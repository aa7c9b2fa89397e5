//! Dry-run unified diff support for `relsync diff`.

use std::path::PathBuf;

use similar::TextDiff;

use relsync_core::Config;

use crate::pipeline::render_updated;
use crate::updater::ChannelOutcome;
use crate::writer::read_existing;
use crate::SyncError;

/// What `update` would change in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDiff {
    pub path: PathBuf,
    pub channels: Vec<ChannelOutcome>,
    /// Empty when the manifest is already current.
    pub unified_diff: String,
}

impl ManifestDiff {
    pub fn is_empty(&self) -> bool {
        self.unified_diff.is_empty()
    }
}

/// Run the update in memory and diff the result against the manifest on disk.
///
/// No files are written.
pub fn diff_manifest(config: &Config) -> Result<ManifestDiff, SyncError> {
    let (rendered, channels) = render_updated(config)?;
    let existing = read_existing(&config.manifest_path)?.unwrap_or_default();

    let unified_diff = if existing == rendered {
        String::new()
    } else {
        let relative = config.manifest_relative();
        let old_header = format!("a/{}", relative.display());
        let new_header = format!("b/{}", relative.display());
        TextDiff::from_lines(&existing, &rendered)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string()
    };

    Ok(ManifestDiff {
        path: config.manifest_path.clone(),
        channels,
        unified_diff,
    })
}
