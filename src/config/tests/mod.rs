//! Unit tests for config module
//!
//! Tests configuration types, defaults, and TOML parsing.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::panic)]

use std::time::Duration;

use crate::{
    KonnectError,
    config::{Config, LogLevel},
};

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert!(!config.general.log_to_file);
    assert_eq!(config.media.settle_interval(), Duration::from_millis(300));
    assert_eq!(config.files.default_limit, 10);
    assert_eq!(config.files.open_command, "xdg-open");
}

#[test]
fn config_serialize_toml() {
    let toml_str = toml::to_string(&Config::default()).unwrap();

    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[media]"));
    assert!(toml_str.contains("[files]"));
}

#[test]
fn config_deserialize_toml() {
    let toml_str = r#"
        [general]
        log_level = "debug"
        log_to_file = true

        [media]
        settle_interval_ms = 450

        [files]
        default_limit = 25
        open_command = "gio open"
    "#;

    let config = Config::from_toml(toml_str, None).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert!(config.general.log_to_file);
    assert_eq!(config.media.settle_interval(), Duration::from_millis(450));
    assert_eq!(config.files.default_limit, 25);
    assert_eq!(config.files.open_command, "gio open");
}

#[test]
fn config_serialize_roundtrip() {
    let original = Config::default();

    let toml_str = toml::to_string(&original).unwrap();
    let deserialized = Config::from_toml(&toml_str, None).unwrap();

    assert_eq!(original, deserialized);
}

#[test]
fn config_partial_sections_keep_defaults() {
    let toml_str = r#"
        [media]
        settle_interval_ms = 500
    "#;

    let config = Config::from_toml(toml_str, None).unwrap();

    assert_eq!(config.media.settle_interval_ms, 500);
    assert_eq!(config.general, Default::default());
    assert_eq!(config.files, Default::default());
}

#[test]
fn config_empty_toml() {
    let config = Config::from_toml("", None).unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn config_invalid_toml() {
    let invalid_toml = r#"
        [general
        invalid syntax here
    "#;

    let result = Config::from_toml(invalid_toml, None);

    assert!(matches!(result, Err(KonnectError::TomlParseError { .. })));
}

#[test]
fn config_wrong_type_is_rejected() {
    let toml_str = r#"
        [media]
        settle_interval_ms = "slow"
    "#;

    assert!(Config::from_toml(toml_str, None).is_err());
}

#[test]
fn config_settle_interval_below_minimum_is_rejected() {
    for value in [0, 299] {
        let toml_str = format!("[media]\nsettle_interval_ms = {value}\n");

        let result = Config::from_toml(&toml_str, None);

        assert!(matches!(
            result,
            Err(KonnectError::InvalidConfigField { ref field, .. }) if field == "settle_interval_ms"
        ));
    }
}

#[test]
fn config_settle_interval_at_minimum_is_accepted() {
    let config = Config::from_toml("[media]\nsettle_interval_ms = 300\n", None).unwrap();

    assert_eq!(config.media.settle_interval(), Duration::from_millis(300));
}

#[test]
fn config_default_limit_out_of_range_is_rejected() {
    for value in [0, 101, 500] {
        let toml_str = format!("[files]\ndefault_limit = {value}\n");

        let result = Config::from_toml(&toml_str, None);

        assert!(matches!(
            result,
            Err(KonnectError::InvalidConfigField { ref field, .. }) if field == "default_limit"
        ));
    }
}

#[test]
fn config_default_limit_bounds_are_accepted() {
    for value in [1, 100] {
        let toml_str = format!("[files]\ndefault_limit = {value}\n");

        let config = Config::from_toml(&toml_str, None).unwrap();

        assert_eq!(config.files.default_limit, value);
    }
}

#[test]
fn config_unknown_log_level_is_rejected() {
    let toml_str = r#"
        [general]
        log_level = "verbose"
    "#;

    assert!(Config::from_toml(toml_str, None).is_err());
}

#[test]
fn config_unknown_fields() {
    let toml_with_unknown = r#"
        [general]
        log_level = "warn"
        unknown_field = "should be ignored"

        [unknown_section]
        some_field = "ignored"
    "#;

    let config = Config::from_toml(toml_with_unknown, None).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Warn);
}

#[test]
fn log_level_display_matches_filter_directive() {
    assert_eq!(LogLevel::Trace.to_string(), "trace");
    assert_eq!(LogLevel::Error.as_str(), "error");
}
