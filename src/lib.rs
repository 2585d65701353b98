//! Konnect - KDE Connect control over the Model Context Protocol.
//!
//! Konnect drives a paired KDE Connect device through the desktop daemon on
//! the session bus and exposes each capability as a tool:
//!
//! - Device listing, battery, ping messages, ringing
//! - Media player control and active player detection
//! - Mirrored notifications
//! - URL and file sharing, received file listing
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use konnect::services::kdeconnect::KdeConnectService;
//!
//! # async fn example() -> konnect::Result<()> {
//! let kdeconnect = KdeConnectService::connect(Duration::from_millis(300)).await?;
//!
//! for id in kdeconnect.devices.list_devices(true, true).await? {
//!     let battery = kdeconnect.battery.status(&id).await?;
//!     println!("{id}: {}%", battery.charge);
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface.
pub mod cli;

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Model Context Protocol server and tools.
pub mod mcp;

/// KDE Connect and local file services.
pub mod services;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use crate::core::{KonnectError, Result};
