//! Emission records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Computed emission for one activity event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emission {
    pub id: i64,
    pub co2e_kg: f64,
    #[serde(default)]
    pub event_id: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub factor_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Optional period for `GET /v1/emissions`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionsQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Body of `POST /v1/emissions/recompute`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecomputeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecomputeResponse {
    pub recalculated_events: u64,
}
