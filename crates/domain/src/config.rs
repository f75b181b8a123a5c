//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS, SESSION_TOKEN_KEY};
use crate::impl_wire_enum_conversions;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the EcoTrack backend, without the `/v1` prefix
    pub base_url: String,
    pub timeout_secs: u64,
    /// Keep cookies between requests (credentialed mode)
    pub with_credentials: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            with_credentials: true,
        }
    }
}

/// Where the session token is persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Process memory only; lost on exit
    Memory,
    /// JSON file on disk
    #[default]
    File,
    /// Platform keychain
    Keyring,
}

impl_wire_enum_conversions!(SessionBackend {
    Memory => "memory",
    File => "file",
    Keyring => "keyring",
});

/// Session persistence settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub backend: SessionBackend,
    /// Key under which the bearer token is stored
    pub token_key: String,
    /// File used by the `file` backend; defaults to `.ecotrack-session.json`
    pub file_path: Option<String>,
    /// Keychain service name used by the `keyring` backend
    pub keyring_service: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::default(),
            token_key: SESSION_TOKEN_KEY.to_string(),
            file_path: None,
            keyring_service: "ecotrack".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing-subscriber` env-filter directive
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "info".to_string(), json: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_contract() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.timeout_secs, 10);
        assert!(config.api.with_credentials);
        assert_eq!(config.session.token_key, "token");
        assert_eq!(config.session.backend, SessionBackend::File);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"api": {"base_url": "https://eco.example"}}"#).unwrap();
        assert_eq!(config.api.base_url, "https://eco.example");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn session_backend_parses_from_str() {
        assert_eq!("keyring".parse::<SessionBackend>().unwrap(), SessionBackend::Keyring);
        assert!("redis".parse::<SessionBackend>().is_err());
    }
}
