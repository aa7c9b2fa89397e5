//! # relsync-sync
//!
//! Artifact selection, checksumming, manifest update, and the hash-gated
//! atomic manifest writer.
//!
//! Call [`pipeline::run`] to update and write the manifest in one step, or
//! [`diff_manifest`] to preview the change without writing.

pub mod checksum;
pub mod diff;
pub mod error;
pub mod pipeline;
pub mod selector;
pub mod updater;
pub mod writer;

pub use diff::{diff_manifest, ManifestDiff};
pub use error::SyncError;
pub use selector::{find_most_recent, Artifact};
pub use updater::{update_manifest, ChannelOutcome};
pub use writer::WriteResult;
