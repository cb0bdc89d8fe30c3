mod common;

use common::temp_config;
use marketlog::config::{Config, ConfigError};
use std::time::Duration;

/// Test that Config::default() produces the documented values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.api.base_url, "http://localhost:1337");
    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(config.api.connect_timeout_seconds, 5);
    assert_eq!(config.ui.page_size, 25);
    assert_eq!(config.ui.loading_delay(), Duration::ZERO);
    assert!(config.session.path.is_none());
    assert!(config.session.resolved_path().ends_with("marketlog/session.json"));
}

/// Test that Config::config_path() returns a path ending with the expected filename.
#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("marketlog/config.toml"));
}

/// A missing file is not an error.
#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.ui.page_size, 25);
}

/// Test a complete file round-trips into typed settings.
#[test]
fn test_load_full_file() {
    let (_dir, path) = temp_config(
        r#"
[api]
base_url = "https://cms.example.com"
timeout_seconds = 10
connect_timeout_seconds = 2

[ui]
loading_delay_ms = 250
page_size = 12

[session]
path = "/var/lib/marketlog/session.json"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.api.base_url, "https://cms.example.com");
    assert_eq!(config.api.timeout(), Duration::from_secs(10));
    assert_eq!(config.api.connect_timeout(), Duration::from_secs(2));
    assert_eq!(config.ui.loading_delay(), Duration::from_millis(250));
    assert_eq!(config.ui.page_size, 12);
    assert_eq!(
        config.session.resolved_path(),
        std::path::PathBuf::from("/var/lib/marketlog/session.json")
    );
}

/// Sections left out fall back to their defaults.
#[test]
fn test_partial_file_keeps_defaults() {
    let (_dir, path) = temp_config("[ui]\npage_size = 5\n");
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.ui.page_size, 5);
    assert_eq!(config.api.timeout_seconds, 30);
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let (_dir, path) = temp_config("[api\nbase_url = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_invalid_values_fail_validation() {
    let (_dir, path) = temp_config("[api]\nbase_url = \"not a url\"\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ValidationError { .. })
    ));

    let (_dir, path) = temp_config("[api]\ntimeout_seconds = 0\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Timeouts"));
}

#[test]
fn test_unreadable_path_is_read_error() {
    // A directory exists but cannot be read as a file.
    let dir = tempfile::TempDir::new().unwrap();
    let err = Config::load_from(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
}

/// An explicit base URL replaces the file value and is validated too.
#[test]
fn test_explicit_base_url_overrides_file() {
    let (_dir, path) = temp_config("[api]\nbase_url = \"not a url\"\n");
    let config =
        Config::load_with_base_url(&path, Some("https://cms.example.com".to_string())).unwrap();
    assert_eq!(config.api.base_url, "https://cms.example.com");

    let (_dir, path) = temp_config("[api]\nbase_url = \"https://cms.example.com\"\n");
    assert!(matches!(
        Config::load_with_base_url(&path, Some("ftp://cms.example.com".to_string())),
        Err(ConfigError::ValidationError { .. })
    ));
}
