//! Analytics records (KPIs, trend, summary)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::impl_wire_enum_conversions;

/// Response of `GET /v1/analytics/kpis`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpisResponse {
    pub total_co2e_kg: f64,
    pub scope1_kg: f64,
    pub scope2_kg: f64,
    pub scope3_kg: f64,
    /// Additional KPI fields the backend may add
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Trend bucket size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendGrain {
    Day,
    Month,
}

impl_wire_enum_conversions!(TrendGrain {
    Day => "day",
    Month => "month",
});

/// One element of `GET /v1/analytics/trend`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: String,
    pub co2e_kg: f64,
}

/// Emissions attributed to one activity category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub co2e_kg: f64,
}

/// Response of `GET /v1/analytics/summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub total_co2e_kg: f64,
    pub facilities_count: u64,
    #[serde(default)]
    pub last_event_at: Option<String>,
    #[serde(default)]
    pub top_categories: Vec<CategoryTotal>,
    #[serde(default)]
    pub scope1_kg: Option<f64>,
    #[serde(default)]
    pub scope2_kg: Option<f64>,
    #[serde(default)]
    pub scope3_kg: Option<f64>,
}

/// Response of `GET /v1/analytics/suggestion`: generated reduction advice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kpis_keep_unknown_fields() {
        let kpis: KpisResponse = serde_json::from_str(
            r#"{"total_co2e_kg": 12.5, "scope1_kg": 1, "scope2_kg": 2, "scope3_kg": 9.5, "intensity": 0.3}"#,
        )
        .unwrap();
        assert_eq!(kpis.total_co2e_kg, 12.5);
        assert_eq!(kpis.extra.get("intensity"), Some(&serde_json::json!(0.3)));
    }

    #[test]
    fn summary_without_top_categories() {
        let summary: SummaryResponse = serde_json::from_str(
            r#"{"total_co2e_kg": 0, "facilities_count": 3, "last_event_at": null}"#,
        )
        .unwrap();
        assert!(summary.top_categories.is_empty());
        assert_eq!(summary.facilities_count, 3);
    }

    #[test]
    fn grain_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TrendGrain::Month).unwrap(), "\"month\"");
        assert_eq!(TrendGrain::Day.as_str(), "day");
    }
}
