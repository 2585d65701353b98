//! Konnect - KDE Connect control over the Model Context Protocol.
//!
//! Loads configuration, installs logging, connects to the session bus and
//! runs the selected subcommand. Startup failures are printed to stderr and
//! exit non-zero.

use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use konnect::{
    Result,
    cli::{self, Cli, Commands, formatting::format_error},
    config::{Config, ConfigPaths},
    mcp::{ToolContext, ToolRegistry},
    services::{files::ReceivedFiles, kdeconnect::KdeConnectService},
    tracing_config,
};
use tracing::{Level, info, span};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => ConfigPaths::main_config()?,
    };
    let config = Config::load_or_default(&config_path)?;
    tracing_config::init(&config.general)?;

    let _span = span!(Level::INFO, "konnect_main").entered();
    info!(config = %config_path.display(), "Loaded configuration");

    let registry = connect(&config).await?;

    match cli.command() {
        Commands::Serve => cli::serve(registry).await?,
        Commands::Tools => println!("{}", cli::list_tools(&registry)),
        Commands::Call { tool, arguments } => {
            println!(
                "{}",
                cli::call_tool(&registry, &tool, arguments.as_deref()).await?
            );
        }
    }

    Ok(())
}

async fn connect(config: &Config) -> Result<ToolRegistry> {
    let kdeconnect = KdeConnectService::connect(config.media.settle_interval()).await?;
    let context = ToolContext::new(kdeconnect, ReceivedFiles::from_env(), config);

    Ok(ToolRegistry::with_context(Arc::new(context)))
}
