//! Error types for relsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No repository root was given on the command line or in the environment.
    #[error("{env} environment variable must be configured (or pass --repo)")]
    MissingRepoRoot { env: &'static str },
}

/// All errors that can arise from loading or serializing the manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file did not exist at the expected path.
    #[error("manifest not found at {path}")]
    NotFound { path: PathBuf },

    /// Underlying I/O failure while reading the manifest.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load; includes file path and line context from serde_yaml.
    #[error("failed to parse manifest at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed, but its top level is not a sequence.
    #[error("manifest at {path} must be a list of channel records")]
    NotASequence { path: PathBuf },

    /// An entry of the top-level sequence is not a mapping.
    #[error("entry #{index} of manifest at {path} is not a mapping")]
    NotAMapping { path: PathBuf, index: usize },

    /// YAML serialization error (write path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
