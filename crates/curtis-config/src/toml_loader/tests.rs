//! Tests for TOML config loading, creation, env overrides and path resolution.

use super::*;
use crate::schema::CurtisConfig;
use std::collections::HashMap;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_curtis_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, curtis_common::ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[api]
address = "http://localhost:8000"

[chat]
memory_length = 10
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.api.address, "http://localhost:8000");
    assert_eq!(config.chat.memory_length, 10);
    // Defaults preserved
    assert_eq!(config.chat.max_response_tokens, 275);
    assert!(config.chat.streaming);
    assert_eq!(config.image.seed, 2);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, curtis_common::ConfigError::ParseError(_)));
}

#[test]
fn load_config_with_invalid_values_returns_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[chat]
max_response_tokens = 9000
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.chat.max_response_tokens, 9000);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("curtis").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert!(config.api.address.is_empty());
    assert_eq!(config.chat.memory_length, 50);
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;

    let config: CurtisConfig = toml::from_str(&default_config_toml()).unwrap();
    assert_eq!(config.chat.max_response_tokens, 275);
}

#[test]
fn default_config_path_is_reasonable() {
    // May not resolve in every CI environment.
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("curtis"));
        assert!(path_str.ends_with("config.toml"));
    }
}

#[test]
fn env_overrides_replace_address_and_key() {
    let vars: HashMap<&str, &str> = [
        (ENV_API_ADDRESS, "https://covalent.example"),
        (ENV_API_KEY, "k-123"),
    ]
    .into_iter()
    .collect();

    let mut config = CurtisConfig::default();
    apply_env_overrides_from(&mut config, |k| vars.get(k).map(|v| v.to_string()));
    assert_eq!(config.api.address, "https://covalent.example");
    assert_eq!(config.api.api_key, "k-123");
}

#[test]
fn empty_env_values_do_not_override() {
    let mut config = CurtisConfig::default();
    config.api.address = "http://from-file".into();
    apply_env_overrides_from(&mut config, |_| Some("  ".to_string()));
    assert_eq!(config.api.address, "http://from-file");
    assert!(config.api.api_key.is_empty());
}
