//! Manifest updater.
//!
//! Per channel: select artifact → checksum → mutate, or skip if the
//! channel's `filter_spec` is excluded. The first failure aborts the whole
//! update; the caller must not write a partially updated manifest.

use std::borrow::Cow;

use relsync_core::{Channel, Config, Manifest};

use crate::checksum::sha256_file;
use crate::error::SyncError;
use crate::selector::find_most_recent;

/// What happened to one channel record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelOutcome {
    /// `download` and `checksum` were set from the selected artifact.
    Updated {
        index: usize,
        channel: String,
        previous_download: Option<String>,
        download: String,
        checksum: String,
        /// `false` when both values were already current.
        changed: bool,
    },
    /// The channel's `filter_spec` is excluded; nothing was touched.
    Skipped { index: usize, channel: String },
}

impl ChannelOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, ChannelOutcome::Updated { changed: true, .. })
    }
}

/// Update every non-excluded channel of `manifest` in place.
pub fn update_manifest(
    config: &Config,
    manifest: &mut Manifest,
) -> Result<Vec<ChannelOutcome>, SyncError> {
    manifest
        .channels
        .iter_mut()
        .enumerate()
        .map(|(index, channel)| update_channel(config, index, channel))
        .collect()
}

/// Update a single channel record.
pub fn update_channel(
    config: &Config,
    index: usize,
    channel: &mut Channel,
) -> Result<ChannelOutcome, SyncError> {
    let label = channel.label(index);

    let Some(filter_spec) = channel.filter_spec().map(Cow::into_owned) else {
        if channel.has_filter_spec() {
            return Err(SyncError::UnsupportedFilterSpec {
                index,
                channel: label,
            });
        }
        return Err(SyncError::MissingFilterSpec {
            index,
            channel: label,
        });
    };
    if config.is_excluded(&filter_spec) {
        tracing::info!("skipping {label}: '{filter_spec}' is excluded");
        return Ok(ChannelOutcome::Skipped {
            index,
            channel: label,
        });
    }

    tracing::info!("updating {label}");
    tracing::info!("looking for most recent '{filter_spec}' version");
    let artifact = find_most_recent(&config.binaries_path, &filter_spec)?;
    let checksum = sha256_file(&config.binaries_path.join(&artifact.name))?;
    let download = config.download_path(&artifact.name);

    let previous_download = channel.download().map(str::to_owned);
    let changed = previous_download.as_deref() != Some(download.as_str())
        || channel.checksum() != Some(checksum.as_str());

    channel.set_download(download.clone());
    channel.set_checksum(checksum.clone());

    Ok(ChannelOutcome::Updated {
        index,
        channel: label,
        previous_download,
        download,
        checksum,
        changed,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::{set_file_mtime, FileTime};
    use relsync_core::{manifest::parse_str, ConfigInput};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    use crate::checksum::sha256_hex;

    fn config(repo: &Path) -> Config {
        Config::resolve(ConfigInput {
            repo_root: Some(repo.to_path_buf()),
            ..ConfigInput::default()
        })
        .expect("config")
    }

    fn add_binary(cfg: &Config, name: &str, content: &[u8], secs: i64) {
        fs::create_dir_all(&cfg.binaries_path).unwrap();
        let path = cfg.binaries_path.join(name);
        fs::write(&path, content).unwrap();
        set_file_mtime(&path, FileTime::from_unix_time(secs, 0)).unwrap();
    }

    fn manifest(yaml: &str) -> Manifest {
        parse_str(Path::new("downloads.yml"), yaml).expect("manifest")
    }

    #[test]
    fn updates_download_and_checksum() {
        let repo = TempDir::new().unwrap();
        let cfg = config(repo.path());
        add_binary(&cfg, "app-1.0.0-linux.bin", b"old", 1_600_000_000);
        add_binary(&cfg, "app-1.1.0-linux.bin", b"new", 1_700_000_000);

        let mut m = manifest("- type: linux\n  filter_spec: linux\n");
        let outcomes = update_manifest(&cfg, &mut m).expect("update");

        let linux = &m.channels[0];
        assert_eq!(linux.download(), Some("binaries/app-1.1.0-linux.bin"));
        assert_eq!(linux.checksum(), Some(sha256_hex(b"new").as_str()));
        assert!(outcomes[0].is_changed());
    }

    #[test]
    fn excluded_channel_is_untouched() {
        let repo = TempDir::new().unwrap();
        let cfg = config(repo.path());
        // No binaries directory at all: any selection attempt would fail.
        let yaml = "- type: wallet\n  filter_spec: libwallet\n  download: keep\n  checksum: keep\n";
        let mut m = manifest(yaml);
        let before = m.clone();

        let outcomes = update_manifest(&cfg, &mut m).expect("update");
        assert_eq!(m, before);
        assert_eq!(
            outcomes,
            vec![ChannelOutcome::Skipped {
                index: 0,
                channel: "wallet".to_string()
            }]
        );
    }

    #[test]
    fn no_match_aborts_update() {
        let repo = TempDir::new().unwrap();
        let cfg = config(repo.path());
        add_binary(&cfg, "app-1.0.0-linux.bin", b"x", 1_600_000_000);

        let mut m = manifest("- type: linux\n  filter_spec: linux\n- type: mac\n  filter_spec: dmg\n");
        let err = update_manifest(&cfg, &mut m).unwrap_err();
        assert!(matches!(err, SyncError::NoMatch { ref pattern, .. } if pattern == "dmg"));
    }

    #[test]
    fn missing_filter_spec_is_an_error() {
        let repo = TempDir::new().unwrap();
        let cfg = config(repo.path());
        let mut m = manifest("- type: docs\n  download: x\n");
        let err = update_manifest(&cfg, &mut m).unwrap_err();
        assert!(matches!(
            err,
            SyncError::MissingFilterSpec { index: 0, ref channel } if channel == "docs"
        ));
    }

    #[test]
    fn numeric_filter_spec_is_matched_as_text() {
        let repo = TempDir::new().unwrap();
        let cfg = config(repo.path());
        add_binary(&cfg, "app-1.0-x86.bin", b"x86", 1_600_000_000);
        add_binary(&cfg, "app-1.0-x64.bin", b"x64", 1_700_000_000);

        let mut m = manifest("- type: win64\n  filter_spec: 64\n");
        update_manifest(&cfg, &mut m).expect("update");
        assert_eq!(m.channels[0].download(), Some("binaries/app-1.0-x64.bin"));
    }

    #[test]
    fn structured_filter_spec_is_a_distinct_error() {
        let repo = TempDir::new().unwrap();
        let cfg = config(repo.path());
        let mut m = manifest("- type: multi\n  filter_spec: [linux, mac]\n");
        let err = update_manifest(&cfg, &mut m).unwrap_err();
        assert!(matches!(
            err,
            SyncError::UnsupportedFilterSpec { index: 0, ref channel } if channel == "multi"
        ));
        assert!(err.to_string().contains("not a string"));
    }

    #[test]
    fn current_values_report_unchanged() {
        let repo = TempDir::new().unwrap();
        let cfg = config(repo.path());
        add_binary(&cfg, "app-linux.bin", b"same", 1_600_000_000);

        let yaml = format!(
            "- type: linux\n  filter_spec: linux\n  download: binaries/app-linux.bin\n  checksum: {}\n",
            sha256_hex(b"same")
        );
        let mut m = manifest(&yaml);
        let outcomes = update_manifest(&cfg, &mut m).expect("update");
        match &outcomes[0] {
            ChannelOutcome::Updated {
                changed,
                previous_download,
                ..
            } => {
                assert!(!changed);
                assert_eq!(previous_download.as_deref(), Some("binaries/app-linux.bin"));
            }
            other => panic!("expected Updated, got {other:?}"),
        }
    }

    #[test]
    fn configured_exclusions_and_prefix_apply() {
        let repo = TempDir::new().unwrap();
        let cfg = Config::resolve(ConfigInput {
            repo_root: Some(repo.path().to_path_buf()),
            download_prefix: Some("files".to_string()),
            exclude: vec!["docker".to_string()],
            ..ConfigInput::default()
        })
        .unwrap();
        add_binary(&cfg, "app.exe", b"exe", 1_600_000_000);

        let mut m = manifest("- type: docker\n  filter_spec: docker\n- type: windows\n  filter_spec: exe\n");
        let outcomes = update_manifest(&cfg, &mut m).expect("update");

        assert!(matches!(outcomes[0], ChannelOutcome::Skipped { .. }));
        assert_eq!(m.channels[0].download(), None);
        assert_eq!(m.channels[1].download(), Some("files/app.exe"));
    }
}
