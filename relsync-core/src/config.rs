//! Run configuration.
//!
//! Paths are resolved once, at startup, from a [`ConfigInput`] (flags and
//! environment values collected by the CLI) into a [`Config`] that is passed
//! explicitly to every component.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::EXCLUDED_FILTER_SPEC;

pub const REPO_ENV: &str = "TARI_WEBSITE_REPO";
pub const MANIFEST_ENV: &str = "DOWNLOADS_YML_PATH";
pub const BINARIES_ENV: &str = "BINARIES_PATH";

pub const DEFAULT_MANIFEST_PATH: &str = "_data/downloads.yml";
pub const DEFAULT_BINARIES_PATH: &str = "_binaries";
pub const DEFAULT_DOWNLOAD_PREFIX: &str = "binaries";

/// Raw, unvalidated configuration values. Empty values count as unset.
#[derive(Debug, Clone, Default)]
pub struct ConfigInput {
    pub repo_root: Option<PathBuf>,
    /// Manifest path relative to the repository root.
    pub manifest: Option<PathBuf>,
    /// Binaries directory relative to the repository root.
    pub binaries: Option<PathBuf>,
    pub download_prefix: Option<String>,
    /// Extra `filter_spec` values to leave untouched.
    pub exclude: Vec<String>,
}

/// Resolved configuration for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub repo_root: PathBuf,
    pub manifest_path: PathBuf,
    pub binaries_path: PathBuf,
    /// Prefix joined with the artifact file name to form `download`.
    pub download_prefix: String,
    /// `filter_spec` values excluded from update. Always contains
    /// [`EXCLUDED_FILTER_SPEC`].
    pub excluded: Vec<String>,
}

impl Config {
    /// Resolve `input` into a [`Config`].
    ///
    /// Returns [`ConfigError::MissingRepoRoot`] if no repository root was
    /// given. Performs no file I/O.
    pub fn resolve(input: ConfigInput) -> Result<Self, ConfigError> {
        let repo_root = non_empty_path(input.repo_root)
            .ok_or(ConfigError::MissingRepoRoot { env: REPO_ENV })?;

        let manifest = non_empty_path(input.manifest)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST_PATH));
        let binaries = non_empty_path(input.binaries)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BINARIES_PATH));
        let download_prefix = input
            .download_prefix
            .map(|p| p.trim_end_matches('/').to_owned())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_DOWNLOAD_PREFIX.to_owned());

        let mut excluded = vec![EXCLUDED_FILTER_SPEC.to_owned()];
        for spec in input.exclude {
            if !spec.is_empty() && !excluded.contains(&spec) {
                excluded.push(spec);
            }
        }

        Ok(Self {
            manifest_path: repo_root.join(manifest),
            binaries_path: repo_root.join(binaries),
            repo_root,
            download_prefix,
            excluded,
        })
    }

    /// Whether a channel with this `filter_spec` is left untouched.
    pub fn is_excluded(&self, filter_spec: &str) -> bool {
        self.excluded.iter().any(|e| e == filter_spec)
    }

    /// The `download` value for an artifact file name: `<prefix>/<file_name>`.
    ///
    /// Always `/`-separated; the value is a site path, not a filesystem path.
    pub fn download_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.download_prefix, file_name)
    }

    /// Manifest path relative to the repository root, for display.
    pub fn manifest_relative(&self) -> &Path {
        self.manifest_path
            .strip_prefix(&self.repo_root)
            .unwrap_or(&self.manifest_path)
    }
}

fn non_empty_path(p: Option<PathBuf>) -> Option<PathBuf> {
    p.filter(|p| !p.as_os_str().is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn input(repo: &str) -> ConfigInput {
        ConfigInput {
            repo_root: Some(PathBuf::from(repo)),
            ..ConfigInput::default()
        }
    }

    #[test]
    fn defaults_are_joined_to_repo_root() {
        let cfg = Config::resolve(input("/site")).expect("resolve");
        assert_eq!(cfg.manifest_path, PathBuf::from("/site/_data/downloads.yml"));
        assert_eq!(cfg.binaries_path, PathBuf::from("/site/_binaries"));
        assert_eq!(cfg.download_prefix, "binaries");
        assert_eq!(cfg.excluded, vec!["libwallet".to_string()]);
    }

    #[test]
    fn overrides_replace_defaults() {
        let cfg = Config::resolve(ConfigInput {
            manifest: Some(PathBuf::from("data/dl.yml")),
            binaries: Some(PathBuf::from("bin")),
            download_prefix: Some("files/".to_string()),
            ..input("/site")
        })
        .expect("resolve");
        assert_eq!(cfg.manifest_path, PathBuf::from("/site/data/dl.yml"));
        assert_eq!(cfg.binaries_path, PathBuf::from("/site/bin"));
        assert_eq!(cfg.download_prefix, "files");
        assert_eq!(cfg.download_path("a.bin"), "files/a.bin");
    }

    #[test]
    fn missing_repo_root_is_an_error() {
        let err = Config::resolve(ConfigInput::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRepoRoot { .. }));
        assert!(err.to_string().contains("TARI_WEBSITE_REPO"));
    }

    #[test]
    fn empty_values_count_as_unset() {
        let err = Config::resolve(ConfigInput {
            repo_root: Some(PathBuf::new()),
            ..ConfigInput::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingRepoRoot { .. }));

        let cfg = Config::resolve(ConfigInput {
            manifest: Some(PathBuf::new()),
            download_prefix: Some(String::new()),
            ..input("/site")
        })
        .expect("resolve");
        assert_eq!(cfg.manifest_path, PathBuf::from("/site/_data/downloads.yml"));
        assert_eq!(cfg.download_prefix, "binaries");
    }

    #[test]
    fn extra_exclusions_are_deduplicated() {
        let cfg = Config::resolve(ConfigInput {
            exclude: vec!["libwallet".into(), "docker".into(), "docker".into()],
            ..input("/site")
        })
        .expect("resolve");
        assert_eq!(cfg.excluded, vec!["libwallet".to_string(), "docker".to_string()]);
        assert!(cfg.is_excluded("docker"));
        assert!(cfg.is_excluded("libwallet"));
        assert!(!cfg.is_excluded("linux"));
    }

    #[test]
    fn manifest_relative_strips_repo_root() {
        let cfg = Config::resolve(input("/site")).expect("resolve");
        assert_eq!(cfg.manifest_relative(), Path::new("_data/downloads.yml"));
    }
}
