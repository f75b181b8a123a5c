//! Emission factor records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Emission factor as returned by `/v1/factors`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub id: i64,
    pub category: String,
    pub unit_in: String,
    pub unit_out: String,
    pub factor_value: f64,
    #[serde(default)]
    pub geography: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub valid_from: Option<String>,
    #[serde(default)]
    pub valid_to: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Optional filters for `GET /v1/factors`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorFilter {
    pub category: Option<String>,
    pub geography: Option<String>,
    /// ISO-8601 date the factor must be valid on
    pub valid_on: Option<String>,
}

/// Query of `GET /v1/factors/preview`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorPreviewQuery {
    pub category: String,
    /// ISO-8601 timestamp of the activity
    pub occurred_at: String,
    pub geography: Option<String>,
}

/// Factor that would be applied to an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorPreview {
    pub category: String,
    pub factor_value: f64,
    #[serde(default)]
    pub geography: Option<String>,
    #[serde(default)]
    pub version: Option<Value>,
}

/// Body of `POST /v1/factors`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFactorRequest {
    pub category: String,
    pub unit_in: String,
    pub unit_out: String,
    pub factor_value: f64,
    pub vendor: String,
    pub method: String,
    pub valid_from: String,
    pub valid_to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geography: Option<String>,
}
