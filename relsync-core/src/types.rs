//! Domain types for the downloads manifest.
//!
//! A [`Channel`] wraps the raw YAML mapping rather than a fixed struct so
//! that fields relsync does not know about survive a load → save cycle
//! untouched and in their original order.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// `filter_spec` value of the channel that is never updated automatically.
pub const EXCLUDED_FILTER_SPEC: &str = "libwallet";

// ---------------------------------------------------------------------------
// Field keys
// ---------------------------------------------------------------------------

pub const TYPE_KEY: &str = "type";
pub const FILTER_SPEC_KEY: &str = "filter_spec";
pub const DOWNLOAD_KEY: &str = "download";
pub const CHECKSUM_KEY: &str = "checksum";

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// One record of the manifest: a downloadable artifact variant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Channel(Mapping);

impl Channel {
    /// The channel label (`type`), e.g. a platform name.
    pub fn kind(&self) -> Option<&str> {
        self.str_field(TYPE_KEY)
    }

    /// The artifact pattern. Numbers and booleans are read as their YAML
    /// text, so `filter_spec: 64` means the pattern `64`. Any other
    /// non-string value reads as `None`.
    pub fn filter_spec(&self) -> Option<Cow<'_, str>> {
        match self.0.get(FILTER_SPEC_KEY)? {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }

    /// Whether the record has a `filter_spec` key, whatever its value.
    pub fn has_filter_spec(&self) -> bool {
        self.0.contains_key(FILTER_SPEC_KEY)
    }

    pub fn download(&self) -> Option<&str> {
        self.str_field(DOWNLOAD_KEY)
    }

    pub fn checksum(&self) -> Option<&str> {
        self.str_field(CHECKSUM_KEY)
    }

    /// Replace `download`. Keeps the key's position if already present,
    /// appends it otherwise.
    pub fn set_download(&mut self, download: impl Into<String>) {
        self.set_str_field(DOWNLOAD_KEY, download.into());
    }

    /// Replace `checksum`. Same ordering rule as [`Channel::set_download`].
    pub fn set_checksum(&mut self, checksum: impl Into<String>) {
        self.set_str_field(CHECKSUM_KEY, checksum.into());
    }

    /// Label used in logs and reports: `type` if present, `#<index>` otherwise.
    pub fn label(&self, index: usize) -> String {
        match self.kind() {
            Some(kind) => kind.to_owned(),
            None => format!("#{index}"),
        }
    }

    /// Read-only access to the underlying mapping.
    pub fn fields(&self) -> &Mapping {
        &self.0
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    fn set_str_field(&mut self, key: &str, value: String) {
        self.0
            .insert(Value::String(key.to_owned()), Value::String(value));
    }
}

impl From<Mapping> for Channel {
    fn from(m: Mapping) -> Self {
        Self(m)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind(), self.filter_spec().as_deref()) {
            (Some(kind), Some(spec)) => write!(f, "{kind} ({spec})"),
            (Some(kind), None) => write!(f, "{kind}"),
            (None, Some(spec)) => write!(f, "({spec})"),
            (None, None) => write!(f, "<unnamed>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// The downloads manifest: an ordered list of channels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub channels: Vec<Channel>,
}

impl From<Vec<Channel>> for Manifest {
    fn from(channels: Vec<Channel>) -> Self {
        Self { channels }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
