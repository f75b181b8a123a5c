//! Integration tests for the `/v1` contract records
//!
//! Payloads below are shaped like real backend responses, including fields
//! the client does not model.

use ecotrack_domain::types::{
    Activity, ActivityEvent, CreateActivityRequest, Emission, Factor, FactorPreview,
    IngestResponse, MeResponse, SummaryResponse, TrendGrain, TrendPoint,
};
use ecotrack_domain::{Config, SessionBackend};

#[test]
fn test_me_response_with_nested_org() {
    let me: MeResponse = serde_json::from_str(
        r#"{
            "id": 4,
            "email": "ops@acme.io",
            "role": "admin",
            "org": {"id": 1, "name": "Acme", "plan": "pro"}
        }"#,
    )
    .unwrap();

    assert_eq!(me.org.name, "Acme");
    assert_eq!(me.role, "admin");
}

#[test]
fn test_summary_with_top_categories() {
    let summary: SummaryResponse = serde_json::from_str(
        r#"{
            "id": 1,
            "total_co2e_kg": 1520.25,
            "scope1_kg": 100.0,
            "scope2_kg": 420.25,
            "scope3_kg": 1000.0,
            "facilities_count": 2,
            "last_event_at": "2024-05-01T10:00:00",
            "top_categories": [
                {"category": "electricity", "co2e_kg": 420.25},
                {"category": "flights", "co2e_kg": 1000.0}
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(summary.top_categories.len(), 2);
    assert_eq!(summary.top_categories[1].category, "flights");
    assert_eq!(summary.scope2_kg, Some(420.25));
}

#[test]
fn test_trend_points_decode_as_list() {
    let points: Vec<TrendPoint> = serde_json::from_str(
        r#"[{"period": "2024-01-01", "co2e_kg": 10}, {"period": "2024-02-01", "co2e_kg": 12.5}]"#,
    )
    .unwrap();

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].co2e_kg, 10.0);
    assert_eq!("MONTH".parse::<TrendGrain>().unwrap(), TrendGrain::Month);
}

#[test]
fn test_factor_keeps_extra_fields() {
    let factor: Factor = serde_json::from_str(
        r#"{
            "id": 9,
            "category": "electricity",
            "unit_in": "kWh",
            "unit_out": "kgCO2e",
            "factor_value": 0.233,
            "geography": "GB",
            "vendor": "DEFRA",
            "method": "location",
            "version": 3,
            "valid_from": "2024-01-01",
            "valid_to": "2024-12-31"
        }"#,
    )
    .unwrap();

    assert_eq!(factor.vendor.as_deref(), Some("DEFRA"));
    assert_eq!(factor.extra.get("version"), Some(&serde_json::json!(3)));

    let preview: FactorPreview = serde_json::from_str(
        r#"{"category": "electricity", "factor_value": 0.233, "geography": "GB", "version": "2024.1"}"#,
    )
    .unwrap();
    assert_eq!(preview.version, Some(serde_json::json!("2024.1")));
}

#[test]
fn test_emission_and_ingest_records() {
    let emissions: Vec<Emission> = serde_json::from_str(
        r#"[{"id": 1, "event_id": 10, "category": "diesel", "scope": "1", "co2e_kg": 26.8, "calc_version": "v2"}]"#,
    )
    .unwrap();
    assert_eq!(emissions[0].scope.as_deref(), Some("1"));
    assert!(emissions[0].extra.contains_key("calc_version"));

    let ingest: IngestResponse = serde_json::from_str(
        r#"{"created_events": 3, "skipped_duplicates": 1, "created_emissions": 3}"#,
    )
    .unwrap();
    assert_eq!(ingest.skipped_duplicates, 1);
}

#[test]
fn test_create_activity_becomes_ingest_event() {
    let request = CreateActivityRequest {
        occurred_at: "2024-04-02T08:00:00Z".into(),
        category: "diesel".into(),
        unit: "L".into(),
        value_numeric: 40.0,
        facility_id: Some(3),
        source_id: None,
        subcategory: None,
        currency: None,
        spend_value: None,
    };

    let event: ActivityEvent = request.into();
    assert_eq!(event.unit.as_deref(), Some("L"));
    assert_eq!(event.value_numeric, Some(40.0));
    assert_eq!(event.facility_id, Some(3));

    let activity: Activity = serde_json::from_str(
        r#"{"id": 5, "occurred_at": "2024-04-02T08:00:00Z", "category": "diesel", "unit": "L", "value_numeric": 40}"#,
    )
    .unwrap();
    assert_eq!(activity.facility_id, None);
}

#[test]
fn test_config_roundtrips_through_toml_shape() {
    let config: Config = serde_json::from_str(
        r#"{"session": {"backend": "keyring", "token_key": "eco_token"}, "logging": {"json": true}}"#,
    )
    .unwrap();

    assert_eq!(config.session.backend, SessionBackend::Keyring);
    assert_eq!(config.session.token_key, "eco_token");
    assert!(config.logging.json);
    assert_eq!(config.api.timeout_secs, 10);
}
