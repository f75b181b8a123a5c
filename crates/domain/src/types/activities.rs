//! Activity records

use serde::{Deserialize, Serialize};

use super::ingest::ActivityEvent;

/// Stored activity as returned by `GET /v1/activities`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub occurred_at: String,
    pub category: String,
    pub unit: String,
    pub value_numeric: f64,
    #[serde(default)]
    pub facility_id: Option<i64>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub spend_value: Option<f64>,
    #[serde(default)]
    pub scope_hint: Option<String>,
}

/// Query filters for `GET /v1/activities`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFilters {
    pub from: Option<String>,
    pub to: Option<String>,
    pub category: Option<String>,
    pub facility_id: Option<i64>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Single activity entered by hand; submitted as a one-event ingest batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateActivityRequest {
    pub occurred_at: String,
    pub category: String,
    pub unit: String,
    pub value_numeric: f64,
    #[serde(default)]
    pub facility_id: Option<i64>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub spend_value: Option<f64>,
}

impl From<CreateActivityRequest> for ActivityEvent {
    fn from(req: CreateActivityRequest) -> Self {
        Self {
            facility_id: req.facility_id,
            category: req.category,
            occurred_at: req.occurred_at,
            unit: Some(req.unit),
            value_numeric: Some(req.value_numeric),
            source_id: req.source_id,
            subcategory: req.subcategory,
            currency: req.currency,
            spend_value: req.spend_value,
        }
    }
}
