//! Configuration schema definitions.
//!
//! Defines the complete configuration structure for Konnect: general
//! settings plus media scanning and received-file handling. All
//! configurations are serializable to/from TOML format.

mod files;
mod general;
mod loading;
mod media;
mod paths;

pub use files::{FilesConfig, MAX_FILE_LIMIT};
pub use general::{GeneralConfig, LogLevel};
pub use media::{MIN_SETTLE_INTERVAL_MS, MediaConfig};
pub use paths::ConfigPaths;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure for Konnect.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Active player scanning.
    #[serde(default)]
    pub media: MediaConfig,

    /// Received file listing and opening.
    #[serde(default)]
    pub files: FilesConfig,
}

#[cfg(test)]
mod tests;
