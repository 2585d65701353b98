//! Command-line interface.
//!
//! `serve` (the default) runs the protocol server on stdio. `tools` and
//! `call` list and invoke tools directly, which is handy when checking a
//! device without a client.

mod commands;
pub mod formatting;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{call_tool, list_tools, serve};

/// Command line of the `konnect` binary
#[derive(Debug, Parser)]
#[command(name = "konnect", version)]
#[command(about = "Control KDE Connect devices over the Model Context Protocol")]
pub struct Cli {
    /// Configuration file (defaults to $XDG_CONFIG_HOME/konnect/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// What to run; serves on stdio when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands of the `konnect` binary
#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Commands {
    /// Serve tools over JSON-RPC on stdin/stdout
    Serve,
    /// List the available tools
    Tools,
    /// Call one tool and print its JSON result
    Call {
        /// Tool name, e.g. list_devices
        tool: String,
        /// Arguments as a JSON object, e.g. '{"device_id": "abc"}'
        arguments: Option<String>,
    },
}

impl Cli {
    /// Subcommand to run, `serve` when none was given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

#[cfg(test)]
mod tests;
