//! Manifest load / parse / serialize.
//!
//! The manifest is a YAML sequence of mappings:
//!
//! ```yaml
//! - type: linux
//!   filter_spec: linux
//!   download: binaries/app-1.1.0-linux.bin
//!   checksum: 9f86d0...
//! ```
//!
//! Writing back to disk is done by `relsync-sync` (atomic, hash-gated);
//! this module only produces the serialized text.

use std::path::Path;

use serde_yaml::Value;

use crate::error::ManifestError;
use crate::types::{Channel, Manifest};

/// Load the manifest at `path`.
///
/// Returns `ManifestError::NotFound` if absent,
/// `ManifestError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(path: &Path) -> Result<Manifest, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_str(path, &contents)
}

/// Parse manifest text. `path` is used only for error context.
pub fn parse_str(path: &Path, contents: &str) -> Result<Manifest, ManifestError> {
    let value: Value = serde_yaml::from_str(contents).map_err(|e| ManifestError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let Value::Sequence(items) = value else {
        return Err(ManifestError::NotASequence {
            path: path.to_path_buf(),
        });
    };

    let channels = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Mapping(m) => Ok(Channel::from(m)),
            _ => Err(ManifestError::NotAMapping {
                path: path.to_path_buf(),
                index,
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Manifest::from(channels))
}

/// Serialize the manifest to YAML text.
pub fn to_yaml_string(manifest: &Manifest) -> Result<String, ManifestError> {
    Ok(serde_yaml::to_string(manifest)?)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
