use std::{path::Path, process::Stdio};

use tokio::process::Command;
use tracing::{debug, instrument, warn};

use super::FileError;

/// Opens files with the desktop's default handler
#[derive(Debug, Clone)]
pub struct FileOpener {
    command: String,
}

impl Default for FileOpener {
    fn default() -> Self {
        Self::new("xdg-open")
    }
}

impl FileOpener {
    /// Uses `command <path>` to open files
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Opener command
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Launches the handler for `path` without waiting for it to exit.
    ///
    /// # Errors
    /// Returns `NotFound` if the path does not exist, `LaunchFailed` if the
    /// handler cannot be started
    #[instrument(skip(self))]
    pub fn open(&self, path: &Path) -> Result<(), FileError> {
        if !path.exists() {
            return Err(FileError::NotFound(path.to_path_buf()));
        }

        let mut child = Command::new(&self.command)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| FileError::LaunchFailed {
                command: self.command.clone(),
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        debug!(command = %self.command, "Launched file handler");
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if !status.success() => {
                    warn!("File handler exited with {status}");
                }
                Ok(_) => {}
                Err(e) => warn!("File handler did not exit cleanly: {e}"),
            }
        });

        Ok(())
    }
}
