//! Error types for relsync-sync.

use std::path::PathBuf;

use thiserror::Error;

use relsync_core::ManifestError;

/// All errors that can arise from selecting, checksumming, and writing.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error loading or serializing the manifest.
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A channel's pattern matched no file in the binaries directory.
    #[error("no file in {dir} matches '{pattern}'")]
    NoMatch { pattern: String, dir: PathBuf },

    /// A channel's `filter_spec` is not a valid regular expression.
    #[error("invalid filter_spec '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A channel that is not excluded has no `filter_spec`.
    #[error("channel {channel} (entry #{index}) has no filter_spec")]
    MissingFilterSpec { index: usize, channel: String },

    /// A channel's `filter_spec` is a sequence, mapping or null.
    #[error("channel {channel} (entry #{index}) has a filter_spec that is not a string")]
    UnsupportedFilterSpec { index: usize, channel: String },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
