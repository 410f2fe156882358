//! Unit tests for configuration loading and graceful degradation
//!
//! Tests the implementation of:
//! - Missing TOML files fall back to defaults instead of failing
//! - Priority order for config file resolution (CLI > env > platform default)
//! - Out-of-range values are clamped, not rejected
//! - Malformed files are reported as configuration errors
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate SORTVIS_CONFIG are marked with #[serial].

use serial_test::serial;
use sortvis_common::config::{resolve_config_path, TomlConfig, VisualizerConfig, CONFIG_ENV_VAR};
use sortvis_common::{Algorithm, Error, Orientation};
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn test_empty_file_yields_defaults() {
    let config = TomlConfig::from_toml_str("").unwrap();

    assert_eq!(config.visualizer, VisualizerConfig::default());
    assert_eq!(config.visualizer.bar_count, 60);
    assert_eq!(config.visualizer.delay_ms, 18.0);
    assert_eq!(config.visualizer.algorithm, Algorithm::Bubble);
    assert_eq!(config.visualizer.orientation, Orientation::Vertical);
    assert_eq!(config.visualizer.pause_poll_interval_ms, 50);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_full_file_is_parsed() {
    let config = TomlConfig::from_toml_str(
        r#"
        [visualizer]
        bar_count = 80
        delay_ms = 10.5
        algorithm = "merge"
        orientation = "horizontal"
        pause_poll_interval_ms = 20

        [logging]
        level = "debug"
        "#,
    )
    .unwrap();

    assert_eq!(config.visualizer.bar_count, 80);
    assert_eq!(config.visualizer.delay_ms, 10.5);
    assert_eq!(config.visualizer.algorithm, Algorithm::Merge);
    assert_eq!(config.visualizer.orientation, Orientation::Horizontal);
    assert_eq!(config.visualizer.pause_poll_interval_ms, 20);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let config = TomlConfig::from_toml_str("[visualizer]\nalgorithm = \"quick\"\n").unwrap();

    assert_eq!(config.visualizer.algorithm, Algorithm::Quick);
    assert_eq!(config.visualizer.bar_count, 60);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_out_of_range_values_are_clamped() {
    let config = TomlConfig::from_toml_str(
        "[visualizer]\nbar_count = 5000\ndelay_ms = 0.1\npause_poll_interval_ms = 0\n",
    )
    .unwrap()
    .clamped();

    assert_eq!(config.visualizer.bar_count, 200);
    assert_eq!(config.visualizer.delay_ms, 1.0);
    assert_eq!(config.visualizer.pause_poll_interval_ms, 1);
}

#[test]
fn test_malformed_file_is_config_error() {
    let result = TomlConfig::from_toml_str("[visualizer]\nalgorithm = \"bogo\"\n");
    assert!(matches!(result, Err(Error::Config(_))));

    let result = TomlConfig::from_toml_str("this is not toml");
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_cli_path_has_highest_priority() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/sortvis-env-config.toml");

    let cli = PathBuf::from("/tmp/sortvis-cli-config.toml");
    let resolved = resolve_config_path(Some(&cli));

    env::remove_var(CONFIG_ENV_VAR);
    assert_eq!(resolved, Some(cli));
}

#[test]
#[serial]
fn test_env_var_used_without_cli_path() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/sortvis-env-config.toml");

    let resolved = resolve_config_path(None);

    env::remove_var(CONFIG_ENV_VAR);
    assert_eq!(resolved, Some(PathBuf::from("/tmp/sortvis-env-config.toml")));
}

#[test]
#[serial]
fn test_missing_file_falls_back_to_defaults() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let config = TomlConfig::load_or_default(Some(&missing)).unwrap();
    assert_eq!(config.visualizer, VisualizerConfig::default());
}

#[test]
#[serial]
fn test_load_or_default_reads_and_clamps_file() {
    env::remove_var(CONFIG_ENV_VAR);
    let file = write_config("[visualizer]\nbar_count = 3\norientation = \"horizontal\"\n");

    let config = TomlConfig::load_or_default(Some(file.path())).unwrap();
    assert_eq!(config.visualizer.bar_count, 10);
    assert_eq!(config.visualizer.orientation, Orientation::Horizontal);
}

#[test]
#[serial]
fn test_load_or_default_via_env_var() {
    let file = write_config("[visualizer]\ndelay_ms = 42\n");
    env::set_var(CONFIG_ENV_VAR, file.path());

    let config = TomlConfig::load_or_default(None);

    env::remove_var(CONFIG_ENV_VAR);
    assert_eq!(config.unwrap().visualizer.delay_ms, 42.0);
}

#[test]
#[serial]
fn test_load_or_default_propagates_parse_errors() {
    env::remove_var(CONFIG_ENV_VAR);
    let file = write_config("[visualizer\n");

    let result = TomlConfig::load_or_default(Some(file.path()));
    assert!(matches!(result, Err(Error::Config(_))));
}
