use std::{
    fmt, io,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;

use crate::{mcp::ToolError, services::kdeconnect::KdeConnectError};

/// Error types for the Konnect application.
///
/// Covers startup concerns: reading configuration, installing the logger and
/// reaching the session bus. Tool failures only surface here for one-shot
/// calls from the command line; the server reports them to the client.
#[derive(Error, Debug)]
pub enum KonnectError {
    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// Standard I/O operation error (for compatibility)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// Configuration field holds a value outside its accepted range
    #[error("invalid config field '{field}' in {component}: {reason}")]
    InvalidConfigField {
        /// The field that is invalid
        field: String,
        /// Component containing the field
        component: String,
        /// Reason why the field is invalid
        reason: String,
    },

    /// Session bus unreachable or KDE Connect call failed at startup
    #[error("KDE Connect: {0}")]
    Bus(#[from] KdeConnectError),

    /// Logger could not be installed
    #[error("failed to initialize logging: {0}")]
    Logging(String),

    /// JSON arguments supplied on the command line are malformed
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// A tool invoked from the command line failed
    #[error(transparent)]
    Tool(#[from] ToolError),
}

/// A specialized `Result` type for Konnect operations.
pub type Result<T> = result::Result<T, KonnectError>;

impl KonnectError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        KonnectError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }
}
