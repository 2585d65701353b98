//! Unit tests for CLI module
//!
//! Tests argument parsing, formatting and one-shot tool calls against an
//! in-memory bridge.

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tempfile::TempDir;

use crate::{
    KonnectError,
    cli::{
        Cli, Commands, call_tool,
        formatting::{Colors, format_error},
        list_tools,
    },
    mcp::{ToolError, tools::test_support},
    services::kdeconnect::{Endpoint, plugins, testing::FakeBridge},
};

#[test]
fn serves_by_default() {
    let cli = Cli::try_parse_from(["konnect"]).unwrap();

    assert_eq!(cli.command(), Commands::Serve);
    assert!(cli.config.is_none());
}

#[test]
fn parses_call_with_arguments_and_config() {
    let cli = Cli::try_parse_from([
        "konnect",
        "call",
        "get_battery",
        r#"{"device_id":"abc"}"#,
        "--config",
        "/tmp/konnect.toml",
    ])
    .unwrap();

    assert_eq!(
        cli.command(),
        Commands::Call {
            tool: "get_battery".to_string(),
            arguments: Some(r#"{"device_id":"abc"}"#.to_string()),
        }
    );
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/konnect.toml")));
}

#[test]
fn rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["konnect", "pair"]).is_err());
}

#[test]
fn format_error_is_red_and_reset() {
    let formatted = format_error("boom");

    assert!(formatted.contains(Colors::RED));
    assert!(formatted.ends_with(Colors::RESET));
    assert!(formatted.contains("boom"));
}

#[test]
fn tool_list_names_every_tool() {
    let home = TempDir::new().unwrap();
    let registry = test_support::registry(Arc::new(FakeBridge::new()), home.path());

    let listing = list_tools(&registry);

    assert!(listing.contains("list_devices"));
    assert!(listing.contains("open_file"));
}

#[tokio::test]
async fn calls_tool_and_prints_json() {
    let home = TempDir::new().unwrap();
    let endpoint = Endpoint::resolve("abc", Some(plugins::BATTERY));
    let bridge = FakeBridge::new()
        .with_int(&endpoint, "charge", 12)
        .with_property(&endpoint, "isCharging", true);
    let registry = test_support::registry(Arc::new(bridge), home.path());

    let output = call_tool(&registry, "get_battery", Some(r#"{"device_id":"abc"}"#))
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["charge"], 12);
}

#[tokio::test]
async fn non_object_arguments_are_rejected() {
    let home = TempDir::new().unwrap();
    let registry = test_support::registry(Arc::new(FakeBridge::new()), home.path());

    let error = call_tool(&registry, "get_battery", Some("[1, 2]"))
        .await
        .unwrap_err();

    assert!(matches!(error, KonnectError::InvalidArguments(_)));
}

#[tokio::test]
async fn unknown_tool_surfaces_as_tool_error() {
    let home = TempDir::new().unwrap();
    let registry = test_support::registry(Arc::new(FakeBridge::new()), home.path());

    let error = call_tool(&registry, "warp_drive", None).await.unwrap_err();

    assert!(matches!(error, KonnectError::Tool(ToolError::NotFound(_))));
}
