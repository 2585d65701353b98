use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Largest number of files a single listing may return
pub const MAX_FILE_LIMIT: u32 = 100;

/// Received file configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct FilesConfig {
    /// Number of files listed when the caller gives no limit (1-100).
    pub default_limit: u32,

    /// Command launched as `<open_command> <path>` to open a file.
    pub open_command: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            open_command: "xdg-open".to_string(),
        }
    }
}
