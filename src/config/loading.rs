use std::{fs, io::ErrorKind, path::Path};

use tracing::{debug, instrument};

use super::{Config, MAX_FILE_LIMIT, MIN_SETTLE_INTERVAL_MS};
use crate::{KonnectError, Result};

impl Config {
    /// Loads configuration from a TOML file, using defaults when it is absent.
    ///
    /// Missing sections and fields take their default values; unknown keys
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or if its
    /// content is not valid TOML for this schema.
    #[instrument]
    pub fn load_or_default(path: &Path) -> Result<Config> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content, Some(path)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No configuration file, using defaults");
                Ok(Config::default())
            }
            Err(e) => Err(KonnectError::IoError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }),
        }
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `TomlParseError` for malformed TOML or mistyped fields, and
    /// `InvalidConfigField` for values outside their accepted range.
    pub fn from_toml(content: &str, path: Option<&Path>) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| KonnectError::toml_parse(e, path))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that the TOML types alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfigField` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.media.settle_interval_ms < MIN_SETTLE_INTERVAL_MS {
            return Err(KonnectError::InvalidConfigField {
                field: "settle_interval_ms".to_string(),
                component: "media".to_string(),
                reason: format!(
                    "must be at least {MIN_SETTLE_INTERVAL_MS}, got {}",
                    self.media.settle_interval_ms
                ),
            });
        }

        if !(1..=MAX_FILE_LIMIT).contains(&self.files.default_limit) {
            return Err(KonnectError::InvalidConfigField {
                field: "default_limit".to_string(),
                component: "files".to_string(),
                reason: format!(
                    "must be between 1 and {MAX_FILE_LIMIT}, got {}",
                    self.files.default_limit
                ),
            });
        }

        Ok(())
    }
}
