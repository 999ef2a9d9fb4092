//! Integration tests for configuration loading and resolution
//!
//! Tests that manipulate CUEGATE_CONFIG are marked with #[serial]
//! so they never race each other on the process environment.

use cuegate_common::config::{ConfigResolver, TomlConfig, CONFIG_ENV_VAR};
use cuegate_common::Error;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn test_from_file_full_config() {
    let file = write_config(
        r#"
host = "0.0.0.0"
port = 7001

[logging]
level = "debug"

[events]
channel_capacity = 16
"#,
    );

    let config = TomlConfig::from_file(file.path()).expect("config should load");
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 7001);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.events.channel_capacity, 16);
}

#[test]
fn test_from_file_malformed_toml() {
    let file = write_config("port = \"not a number\"\n");
    let result = TomlConfig::from_file(file.path());
    assert!(matches!(result, Err(Error::TomlParse(_))));
}

#[test]
fn test_from_file_invalid_values() {
    let file = write_config("[events]\nchannel_capacity = 0\n");
    let result = TomlConfig::from_file(file.path());
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_explicit_path_wins_over_env() {
    let env_file = write_config("port = 7100\n");
    let cli_file = write_config("port = 7200\n");
    env::set_var(CONFIG_ENV_VAR, env_file.path());

    let resolver = ConfigResolver::new(Some(cli_file.path().to_path_buf()));
    let config = resolver.resolve().expect("config should load");

    env::remove_var(CONFIG_ENV_VAR);
    assert_eq!(config.port, 7200);
}

#[test]
#[serial]
fn test_env_var_path_used() {
    let env_file = write_config("port = 7300\n");
    env::set_var(CONFIG_ENV_VAR, env_file.path());

    let resolver = ConfigResolver::new(None);
    let located = resolver.locate();
    let config = resolver.resolve().expect("config should load");

    env::remove_var(CONFIG_ENV_VAR);
    assert_eq!(located, Some((env_file.path().to_path_buf(), true)));
    assert_eq!(config.port, 7300);
}

#[test]
#[serial]
fn test_missing_explicit_path_is_error() {
    env::remove_var(CONFIG_ENV_VAR);
    let resolver = ConfigResolver::new(Some(PathBuf::from(
        "/nonexistent/cuegate-test/config.toml",
    )));
    assert!(matches!(resolver.resolve(), Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_no_overrides_never_fails() {
    env::remove_var(CONFIG_ENV_VAR);
    let resolver = ConfigResolver::new(None);

    match resolver.locate() {
        // A platform config file happens to exist on this machine
        Some((_, explicit)) => assert!(!explicit),
        None => assert_eq!(resolver.resolve().unwrap(), TomlConfig::default()),
    }
}
