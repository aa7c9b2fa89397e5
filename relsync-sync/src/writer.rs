//! Hash-gated atomic manifest writer.
//!
//! ## `write_manifest` protocol
//!
//! 1. Serialize the manifest (already done by caller).
//! 2. SHA-256 hash the serialized content.
//! 3. Hash the file currently on disk (missing file = no hash).
//! 4. Compare → skip if identical.
//! 5. Write to `<target>.relsync.tmp`, carrying over the target's permissions.
//! 6. Rename to final path (atomic on POSIX).
//!
//! When `path` is a symlink, the file it points at is the target: the link
//! itself is left in place and the real file is replaced.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::checksum::sha256_hex;
use crate::error::{io_err, SyncError};

/// Outcome of writing the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped: serialized content matches what is on disk.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

/// Atomically replace `path` with `content` unless it already holds it.
pub fn write_manifest(path: &Path, content: &str, dry_run: bool) -> Result<WriteResult, SyncError> {
    let target = resolve_target(path)?;
    let tmp = PathBuf::from(format!("{}.relsync.tmp", target.display()));
    write_with_tmp(path, &target, content, dry_run, &tmp)
}

/// The file that actually gets replaced: `path` itself, or what it links to.
fn resolve_target(path: &Path) -> Result<PathBuf, SyncError> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            std::fs::canonicalize(path).map_err(|e| io_err(path, e))
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn write_with_tmp(
    path: &Path,
    target: &Path,
    content: &str,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, SyncError> {
    // Steps 2-4: compare digests of the normalised content.
    let digest = sha256_hex(content.as_bytes());
    if let Some(existing) = read_existing(target)? {
        if sha256_hex(existing.as_bytes()) == digest {
            tracing::debug!("unchanged: {}", path.display());
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    // Step 5: write to .tmp beside the target (same filesystem).
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;
    if let Ok(meta) = std::fs::metadata(target) {
        if let Err(e) = std::fs::set_permissions(tmp, meta.permissions()) {
            let _ = std::fs::remove_file(tmp);
            return Err(io_err(tmp, e));
        }
    }

    // Step 6: atomic rename to final path.
    if let Err(e) = std::fs::rename(tmp, target) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

/// Current on-disk content with CRLF normalised to LF, or `None` if absent.
pub(crate) fn read_existing(path: &Path) -> Result<Option<String>, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content.replace("\r\n", "\n"))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
