use std::{env, io};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    KonnectError, Result,
    config::{ConfigPaths, GeneralConfig},
};

const DAYS_TO_KEEP: usize = 7;

/// Environment variable selecting `json` or `pretty` output
pub const LOG_FORMAT_VAR: &str = "KONNECT_LOG_FORMAT";

/// Initialize tracing for the application
///
/// Logs go to stderr; stdout belongs to the protocol. `RUST_LOG` takes
/// precedence over the configured level. Output is pretty unless
/// `KONNECT_LOG_FORMAT=json`. With `log_to_file`, logs are also written to
/// daily rotated files in `~/.konnect/logs`.
///
/// # Errors
/// Returns error if the log directory cannot be created or a subscriber is
/// already installed
pub fn init(general: &GeneralConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(general.log_level.as_str()));
    let json = env::var(LOG_FORMAT_VAR).is_ok_and(|format| format == "json");

    if general.log_to_file {
        init_with_file(env_filter, json)
    } else {
        init_stderr(env_filter, json)
    }
}

fn init_stderr(env_filter: EnvFilter, json: bool) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(io::stderr),
            )
            .try_init()
    };

    installed.map_err(|e| KonnectError::Logging(e.to_string()))
}

fn init_with_file(env_filter: EnvFilter, json: bool) -> Result<()> {
    let log_dir = ConfigPaths::log_dir()?;

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix("konnect")
        .filename_suffix("log")
        .build(&log_dir)
        .map_err(|e| KonnectError::Logging(e.to_string()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(io::stderr),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(io::stderr),
            )
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()
    };
    installed.map_err(|e| KonnectError::Logging(e.to_string()))?;

    // The writer thread must outlive every span; the process exits with it.
    std::mem::forget(guard);

    Ok(())
}
