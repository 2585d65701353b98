use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logging level for the application.
///
/// Controls the verbosity of log output written to stderr and, when
/// enabled, to the log files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only failures that stop the server or a tool call.
    Error,

    /// Also recoverable problems, such as a player selection that could not be restored.
    Warn,

    /// Also server lifecycle and tool calls (default level).
    #[default]
    Info,

    /// Also individual bus calls and per-player samples.
    Debug,

    /// Everything, including span entry and exit.
    Trace,
}

impl LogLevel {
    /// Filter directive accepted by `EnvFilter`
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
