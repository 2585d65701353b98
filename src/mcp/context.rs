use crate::{
    config::Config,
    services::{
        files::{FileOpener, ReceivedFiles},
        kdeconnect::KdeConnectService,
    },
};

/// Shared dependencies handed to every tool
#[derive(Clone)]
pub struct ToolContext {
    /// Device operations over the session bus
    pub kdeconnect: KdeConnectService,
    /// Received file lookup
    pub files: ReceivedFiles,
    /// Local file launcher
    pub opener: FileOpener,
    /// Files listed when a call gives no limit
    pub default_limit: u32,
}

impl ToolContext {
    /// Wires services with the configured file settings
    pub fn new(kdeconnect: KdeConnectService, files: ReceivedFiles, config: &Config) -> Self {
        Self {
            kdeconnect,
            files,
            opener: FileOpener::new(config.files.open_command.clone()),
            default_limit: config.files.default_limit,
        }
    }
}
