//! Configuration loader
//!
//! Builds the client configuration from an optional file plus environment
//! overrides.
//!
//! ## Loading Strategy
//! 1. Probe standard locations for a config file; use defaults if none exists
//! 2. Parse it as TOML or JSON (by extension); unset fields keep defaults
//! 3. Apply `ECOTRACK_*` environment overrides on top
//!
//! ## Environment Variables
//! - `ECOTRACK_API_URL`: Backend base URL
//! - `ECOTRACK_API_TIMEOUT_SECS`: Request timeout in seconds
//! - `ECOTRACK_WITH_CREDENTIALS`: Keep cookies between requests (true/false)
//! - `ECOTRACK_SESSION_BACKEND`: `memory`, `file` or `keyring`
//! - `ECOTRACK_SESSION_FILE`: Session file for the `file` backend
//! - `ECOTRACK_SESSION_KEY`: Storage key of the bearer token
//! - `ECOTRACK_LOG`: Log filter directive
//! - `ECOTRACK_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes, in order, `ecotrack.{toml,json}` then
//! `config.{toml,json}` in the working directory, its two parents, and the
//! executable's directory.

use std::path::{Path, PathBuf};

use ecotrack_domain::{Config, EcoTrackError, Result, SessionBackend};

const CONFIG_FILE_NAMES: &[&str] = &["ecotrack.toml", "ecotrack.json", "config.toml", "config.json"];

/// Load configuration: probed file (or defaults), then environment overrides
///
/// # Errors
/// Returns `EcoTrackError::Config` if a probed file is unreadable or invalid,
/// or an override has an invalid value.
pub fn load() -> Result<Config> {
    let config = match probe_config_paths() {
        Some(path) => read_config(&path)?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };
    apply_env_overrides(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Environment overrides
/// are not applied.
///
/// # Errors
/// Returns `EcoTrackError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(EcoTrackError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            EcoTrackError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    read_config(&config_path)
}

fn read_config(path: &Path) -> Result<Config> {
    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| EcoTrackError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| EcoTrackError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| EcoTrackError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(EcoTrackError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Apply `ECOTRACK_*` variables on top of `config`
///
/// Unset variables leave the corresponding field untouched.
///
/// # Errors
/// Returns `EcoTrackError::Config` for an unparseable timeout or an unknown
/// session backend.
pub fn apply_env_overrides(mut config: Config) -> Result<Config> {
    if let Some(url) = env_var("ECOTRACK_API_URL") {
        config.api.base_url = url;
    }
    if let Some(timeout) = env_var("ECOTRACK_API_TIMEOUT_SECS") {
        config.api.timeout_secs = timeout
            .parse::<u64>()
            .map_err(|e| EcoTrackError::Config(format!("Invalid request timeout: {}", e)))?;
    }
    config.api.with_credentials = env_bool("ECOTRACK_WITH_CREDENTIALS", config.api.with_credentials);

    if let Some(backend) = env_var("ECOTRACK_SESSION_BACKEND") {
        config.session.backend = backend.to_ascii_lowercase().parse::<SessionBackend>().map_err(|_| {
            EcoTrackError::Config(format!(
                "Invalid session backend '{}': expected memory, file or keyring",
                backend
            ))
        })?;
    }
    if let Some(path) = env_var("ECOTRACK_SESSION_FILE") {
        config.session.file_path = Some(path);
    }
    if let Some(key) = env_var("ECOTRACK_SESSION_KEY") {
        config.session.token_key = key;
    }

    if let Some(filter) = env_var("ECOTRACK_LOG") {
        config.logging.filter = filter;
    }
    config.logging.json = env_bool("ECOTRACK_LOG_JSON", config.logging.json);

    Ok(config)
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
        dirs.push(cwd.join("../.."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Non-empty environment variable
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    env_var(key)
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
