//! Error types for the non-HTTP parts of EcoTrack (configuration, session
//! storage, input handling).
//!
//! HTTP failures have their own taxonomy in `ecotrack-infra::api::ApiError`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for EcoTrack
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum EcoTrackError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for EcoTrack operations
pub type Result<T> = std::result::Result<T, EcoTrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let err = EcoTrackError::Storage("disk full".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Storage");
        assert_eq!(json["message"], "disk full");
    }

    #[test]
    fn display_includes_prefix() {
        let err = EcoTrackError::Config("missing url".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing url");
    }
}
