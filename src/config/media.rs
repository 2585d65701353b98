use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shortest settle interval accepted from configuration, in milliseconds
pub const MIN_SETTLE_INTERVAL_MS: u64 = 300;

/// Active player scanning configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct MediaConfig {
    /// Milliseconds to wait after switching players before sampling their
    /// state. The remote needs time to refresh its derived properties, so
    /// values below 300 are rejected.
    pub settle_interval_ms: u64,
}

impl MediaConfig {
    /// Settle interval as a duration
    pub fn settle_interval(&self) -> Duration {
        Duration::from_millis(self.settle_interval_ms)
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            settle_interval_ms: MIN_SETTLE_INTERVAL_MS,
        }
    }
}
