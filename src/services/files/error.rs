use std::path::PathBuf;

/// Errors raised by local file operations that are surfaced to callers
#[derive(thiserror::Error, Debug)]
pub enum FileError {
    /// The file to open does not exist
    #[error("file '{0}' does not exist")]
    NotFound(PathBuf),

    /// The default handler could not be started
    #[error("failed to launch '{command}' for '{path}': {details}")]
    LaunchFailed {
        /// Opener command
        command: String,
        /// File that was being opened
        path: PathBuf,
        /// Underlying error
        details: String,
    },

    /// The background listing task did not complete
    #[error("background file task failed: {0}")]
    Background(String),
}
