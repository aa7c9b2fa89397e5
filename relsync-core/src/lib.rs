//! relsync core library — configuration, manifest types, manifest parsing.
//!
//! - [`config`] — [`Config`] resolution from flags / environment
//! - [`types`] — [`Channel`] and [`Manifest`]
//! - [`manifest`] — load / parse / serialize
//! - [`error`] — [`ConfigError`], [`ManifestError`]

pub mod config;
pub mod error;
pub mod manifest;
pub mod types;

pub use config::{Config, ConfigInput};
pub use error::{ConfigError, ManifestError};
pub use types::{Channel, Manifest, EXCLUDED_FILTER_SPEC};
