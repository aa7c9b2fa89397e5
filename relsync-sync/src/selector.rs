//! Artifact selection: the most recently modified file matching a pattern.
//!
//! The pattern is a regular expression searched anywhere in the file name,
//! so a plain string such as `linux` acts as a substring test.
//!
//! Tie-break: candidates are ordered by file name before the max-by-mtime
//! reduction, and the last of several equal timestamps wins. The result
//! therefore depends only on names and timestamps, never on directory
//! listing order.

use std::path::Path;
use std::time::SystemTime;

use regex::Regex;

use crate::error::{io_err, SyncError};

/// A regular file in the binaries directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub modified: SystemTime,
}

/// Compile a channel's `filter_spec` into a matcher.
pub fn compile_pattern(pattern: &str) -> Result<Regex, SyncError> {
    Regex::new(pattern).map_err(|e| SyncError::InvalidPattern {
        pattern: pattern.to_owned(),
        source: e,
    })
}

/// List the regular files in `dir` whose names match `pattern`, sorted by name.
///
/// Only matching entries are stat'ed, so unrelated entries (dangling
/// symlinks, files removed mid-scan) never fail the listing. Subdirectories
/// and names that are not valid UTF-8 are skipped.
pub fn list_matching(dir: &Path, pattern: &Regex) -> Result<Vec<Artifact>, SyncError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;

    let mut artifacts = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let Ok(name) = entry.file_name().into_string() else {
            tracing::debug!("skipping non UTF-8 file name: {}", path.display());
            continue;
        };
        if !pattern.is_match(&name) {
            continue;
        }
        let meta = std::fs::metadata(&path).map_err(|e| io_err(&path, e))?;
        if !meta.is_file() {
            continue;
        }
        let modified = meta.modified().map_err(|e| io_err(&path, e))?;
        artifacts.push(Artifact { name, modified });
    }
    artifacts.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(artifacts)
}

/// Pick the most recently modified artifact whose name matches `pattern`.
///
/// `candidates` must be sorted by name (as returned by [`list_matching`]).
/// Returns `None` when nothing matches.
pub fn select_latest<'a>(candidates: &'a [Artifact], pattern: &Regex) -> Option<&'a Artifact> {
    // `max_by_key` yields the last element among equal keys.
    candidates
        .iter()
        .filter(|a| pattern.is_match(&a.name))
        .max_by_key(|a| a.modified)
}

/// Find the most recently modified file in `dir` matching `pattern`.
///
/// Returns [`SyncError::NoMatch`] if no file matches.
pub fn find_most_recent(dir: &Path, pattern: &str) -> Result<Artifact, SyncError> {
    let matcher = compile_pattern(pattern)?;
    let artifacts = list_matching(dir, &matcher)?;

    let Some(latest) = select_latest(&artifacts, &matcher) else {
        return Err(SyncError::NoMatch {
            pattern: pattern.to_owned(),
            dir: dir.to_path_buf(),
        });
    };
    tracing::info!(
        "{} candidate(s) for '{pattern}', selected {}",
        artifacts.len(),
        latest.name
    );
    Ok(latest.clone())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
