//! Emission factor catalogue

use ecotrack_common::validation::{iso_date, non_negative, required};
use ecotrack_common::Validator;
use ecotrack_domain::{CreateFactorRequest, Factor, FactorFilter, FactorPreview, FactorPreviewQuery};
use tracing::{debug, info, instrument};

use super::client::ApiClient;
use super::errors::ApiError;
use super::{finish_validation, shape, unit};
use crate::http::RequestDescriptor;

const FACTOR_FIELDS: &[&str] = &["id", "category", "unit_in", "unit_out", "factor_value"];

pub struct FactorsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> FactorsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Factors matching `filter`; unset filter fields are not sent
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &FactorFilter) -> Result<Vec<Factor>, ApiError> {
        let mut validator = Validator::new().stop_on_first_error();
        if let Some(valid_on) = filter.valid_on.as_deref() {
            validator.check("valid_on", unit(iso_date(valid_on, "valid_on")));
        }
        finish_validation("factors.list", validator)?;

        let descriptor = RequestDescriptor::get("/v1/factors")
            .query_opt("category", filter.category.as_deref())
            .query_opt("geography", filter.geography.as_deref())
            .query_opt("valid_on", filter.valid_on.as_deref())
            .build();
        let value = self.client.fetch_json(&descriptor).await?;

        shape::expect_records(&value, "factors", FACTOR_FIELDS)?;
        let factors: Vec<Factor> = shape::decode(value, "factors")?;
        debug!(count = factors.len(), "factors loaded");
        Ok(factors)
    }

    /// Factor that would apply to an activity of `category` at `occurred_at`
    #[instrument(skip(self))]
    pub async fn preview(&self, query: &FactorPreviewQuery) -> Result<FactorPreview, ApiError> {
        let mut validator = Validator::new().stop_on_first_error();
        validator
            .check("category", required(&query.category, "Factor category is required"))
            .check("occurred_at", unit(iso_date(&query.occurred_at, "occurred_at")));
        finish_validation("factors.preview", validator)?;

        let descriptor = RequestDescriptor::get("/v1/factors/preview")
            .query("category", &query.category)
            .query("occurred_at", &query.occurred_at)
            .query_opt("geography", query.geography.as_deref())
            .build();
        let value = self.client.fetch_json(&descriptor).await?;

        shape::expect_fields(&value, "factor preview", &["category", "factor_value"])?;
        shape::decode(value, "factor preview")
    }

    /// Add a factor to the catalogue (admin only on the backend)
    #[instrument(skip(self, request), fields(category = %request.category))]
    pub async fn create(&self, request: &CreateFactorRequest) -> Result<Factor, ApiError> {
        let mut validator = Validator::new().stop_on_first_error();
        validator
            .check("category", required(&request.category, "Factor category is required"))
            .check("unit_in", required(&request.unit_in, "Input unit is required"))
            .check("unit_out", required(&request.unit_out, "Output unit is required"))
            .check(
                "factor_value",
                non_negative(request.factor_value, "Factor value must be a non-negative number"),
            )
            .check("vendor", required(&request.vendor, "Vendor is required"))
            .check("method", required(&request.method, "Method is required"))
            .check("valid_from", unit(iso_date(&request.valid_from, "valid_from")))
            .check("valid_to", unit(iso_date(&request.valid_to, "valid_to")));
        finish_validation("factors.create", validator)?;

        let descriptor =
            RequestDescriptor::post("/v1/factors").json(ApiClient::to_json(request)?).build();
        let value = self.client.fetch_json(&descriptor).await?;

        shape::expect_fields(&value, "factor", FACTOR_FIELDS)?;
        let factor: Factor = shape::decode(value, "factor")?;
        info!(factor_id = factor.id, "factor created");
        Ok(factor)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ecotrack_core::SessionManager;
    use ecotrack_domain::ApiConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::session::MemorySessionStore;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::builder()
            .config(ApiConfig { base_url: server.uri(), ..ApiConfig::default() })
            .session(SessionManager::new(Arc::new(MemorySessionStore::new())))
            .build()
            .unwrap()
    }

    fn new_factor() -> CreateFactorRequest {
        CreateFactorRequest {
            category: "electricity".into(),
            unit_in: "kWh".into(),
            unit_out: "kgCO2e".into(),
            factor_value: 0.233,
            vendor: "DEFRA".into(),
            method: "location".into(),
            valid_from: "2024-01-01".into(),
            valid_to: "2024-12-31".into(),
            geography: Some("UK".into()),
        }
    }

    #[tokio::test]
    async fn list_sends_only_set_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/factors"))
            .and(query_param("category", "fuel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 1, "category": "fuel", "unit_in": "l", "unit_out": "kgCO2e", "factor_value": 2.3
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let filter = FactorFilter { category: Some("fuel".into()), ..FactorFilter::default() };
        let factors = client_for(&server).factors().list(&filter).await.unwrap();
        assert_eq!(factors[0].factor_value, 2.3);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("category=fuel"));
    }

    #[tokio::test]
    async fn create_rejects_blank_category_offline() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

        let request = CreateFactorRequest { category: "  ".into(), ..new_factor() };
        let err = client_for(&server).factors().create(&request).await.unwrap_err();
        assert_eq!(err, ApiError::Validation("Factor category is required".into()));

        let request = CreateFactorRequest { factor_value: -1.0, ..new_factor() };
        let err = client_for(&server).factors().create(&request).await.unwrap_err();
        assert_eq!(err, ApiError::Validation("Factor value must be a non-negative number".into()));
    }

    #[tokio::test]
    async fn create_returns_stored_factor() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/factors"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 77, "category": "electricity", "unit_in": "kWh",
                "unit_out": "kgCO2e", "factor_value": 0.233, "geography": "UK"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let factor = client_for(&server).factors().create(&new_factor()).await.unwrap();
        assert_eq!(factor.id, 77);
        assert_eq!(factor.geography.as_deref(), Some("UK"));
    }

    #[tokio::test]
    async fn preview_requires_iso_timestamp() {
        let server = MockServer::start().await;
        let query = FactorPreviewQuery {
            category: "electricity".into(),
            occurred_at: "yesterday".into(),
            geography: None,
        };

        let err = client_for(&server).factors().preview(&query).await.unwrap_err();
        assert_eq!(err, ApiError::Validation("occurred_at must be a valid ISO-8601 date".into()));
    }
}
