/// Local file error types
pub mod error;
/// Opening files with the desktop's default handler
pub mod opener;

use std::{
    env, fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{debug, instrument};

pub use error::FileError;
pub use opener::FileOpener;

/// Key of the download directory in a device's share configuration
const INCOMING_PATH_KEY: &str = "incoming_path=";

/// A file received from a device
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceivedFile {
    /// File name
    pub name: String,
    /// Absolute path
    pub path: String,
    /// Size in bytes
    pub size: u64,
    /// Modification time, local ctime-style
    pub modified: String,
    /// Modification time in seconds since the Unix epoch
    pub modified_timestamp: f64,
}

/// Files found in a device's download directory
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedFileListing {
    /// Directory that was listed
    pub download_directory: PathBuf,
    /// Newest files first
    pub files: Vec<ReceivedFile>,
}

/// Locates and lists files that devices have sent to this host.
///
/// Local read failures never surface: an unreadable share configuration
/// falls back to `~/Downloads`, a missing directory lists as empty.
#[derive(Debug, Clone)]
pub struct ReceivedFiles {
    home: PathBuf,
}

impl ReceivedFiles {
    /// Resolves paths relative to the given home directory
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Resolves paths relative to `$HOME`
    pub fn from_env() -> Self {
        Self::new(env::var("HOME").unwrap_or_default())
    }

    /// Per-device share configuration written by the KDE Connect daemon
    pub fn share_config_path(&self, device_id: &str) -> PathBuf {
        self.home
            .join(".config")
            .join("kdeconnect")
            .join(format!("{device_id}_share"))
            .join("config")
    }

    /// Directory where files from the device are stored.
    ///
    /// The first `incoming_path=` line of the device's share configuration
    /// wins; otherwise `~/Downloads`.
    pub fn download_directory(&self, device_id: &str) -> PathBuf {
        let config_path = self.share_config_path(device_id);

        match fs::read_to_string(&config_path) {
            Ok(content) => content
                .lines()
                .find_map(|line| line.strip_prefix(INCOMING_PATH_KEY))
                .map(|value| PathBuf::from(value.trim()))
                .unwrap_or_else(|| self.default_download_directory()),
            Err(e) => {
                debug!("No share config at {}: {e}", config_path.display());
                self.default_download_directory()
            }
        }
    }

    fn default_download_directory(&self) -> PathBuf {
        self.home.join("Downloads")
    }

    /// Most recently modified files in the device's download directory.
    ///
    /// Only regular files directly inside the directory are listed, newest first.
    /// Symlinks are followed, so a link to a regular file is listed under the
    /// link's name.
    #[instrument(skip(self))]
    pub fn list_received_files(&self, device_id: &str, limit: usize) -> Vec<ReceivedFile> {
        newest_files(&self.download_directory(device_id), limit)
    }

    /// Resolves the download directory and lists it on the blocking pool.
    ///
    /// # Errors
    /// Returns `Background` if the blocking task panics or is cancelled
    #[instrument(skip(self))]
    pub async fn scan(
        &self,
        device_id: &str,
        limit: usize,
    ) -> Result<ReceivedFileListing, FileError> {
        let files = self.clone();
        let device_id = device_id.to_string();

        tokio::task::spawn_blocking(move || {
            let download_directory = files.download_directory(&device_id);
            let files = newest_files(&download_directory, limit);
            ReceivedFileListing {
                download_directory,
                files,
            }
        })
        .await
        .map_err(|e| FileError::Background(e.to_string()))
    }
}

fn newest_files(directory: &Path, limit: usize) -> Vec<ReceivedFile> {
    let mut files = list_directory(directory);

    files.sort_by(|a, b| b.modified_timestamp.total_cmp(&a.modified_timestamp));
    files.truncate(limit);
    files
}

fn list_directory(directory: &Path) -> Vec<ReceivedFile> {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot list {}: {e}", directory.display());
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let path = entry.path();
            let metadata = fs::metadata(&path).ok()?;
            if !metadata.is_file() {
                return None;
            }
            let modified = metadata.modified().ok()?;

            Some(ReceivedFile {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: path.to_string_lossy().into_owned(),
                size: metadata.len(),
                modified: format_modified(modified),
                modified_timestamp: unix_seconds(modified),
            })
        })
        .collect()
}

fn format_modified(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%a %b %e %H:%M:%S %Y")
        .to_string()
}

fn unix_seconds(time: SystemTime) -> f64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs_f64(),
        Err(before) => -before.duration().as_secs_f64(),
    }
}
