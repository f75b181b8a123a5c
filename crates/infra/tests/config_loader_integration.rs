//! Integration tests for configuration loader
//!
//! Loads configuration files from disk and builds a working client from them.

use std::io::Write;

use ecotrack_domain::{EcoTrackError, SessionBackend};
use ecotrack_infra::{config, ApiClient};
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_config(
        r#"{
        "api": {
            "base_url": "https://api.ecotrack.example",
            "timeout_secs": 15,
            "with_credentials": false
        },
        "session": {
            "backend": "memory",
            "token_key": "eco_token"
        },
        "logging": {
            "filter": "ecotrack_infra=debug",
            "json": true
        }
    }"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("Failed to load JSON config");

    assert_eq!(config.api.base_url, "https://api.ecotrack.example");
    assert_eq!(config.api.timeout_secs, 15);
    assert!(!config.api.with_credentials);
    assert_eq!(config.session.backend, SessionBackend::Memory);
    assert_eq!(config.session.token_key, "eco_token");
    assert_eq!(config.logging.filter, "ecotrack_infra=debug");
    assert!(config.logging.json);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_with_minimal_fields() {
    let path = write_config("[api]\nbase_url = \"http://127.0.0.1:9000\"\n", "toml");

    let config = config::load_from_file(Some(path.clone())).expect("Failed to load TOML config");

    assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.session.backend, SessionBackend::File);
    assert_eq!(config.session.file_path, None);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_loaded_config_builds_client() {
    let path = write_config(
        "[api]\nbase_url = \"http://127.0.0.1:9000\"\n\n[session]\nbackend = \"memory\"\n",
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("config");
    let client = ApiClient::from_config(&config).expect("client from config");
    assert_eq!(client.http().base_url().as_str(), "http://127.0.0.1:9000/");
    assert!(!client.auth().is_authenticated());

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_nonexistent_file() {
    let result = config::load_from_file(Some("/nonexistent/path/ecotrack.json".into()));

    match result {
        Err(EcoTrackError::Config(msg)) => {
            assert!(msg.contains("not found"), "Error message should mention 'not found'");
        }
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_load_config_with_invalid_format() {
    let path = write_config(r#"{ "api": { "base_url": 5 } }"#, "json");

    match config::load_from_file(Some(path.clone())) {
        Err(EcoTrackError::Config(msg)) => {
            assert!(msg.contains("Invalid JSON"), "Error message should mention invalid JSON");
        }
        _ => panic!("Expected Config error"),
    }

    std::fs::remove_file(path).ok();
}
