//! Dashboard analytics: KPIs, trend series, tenant summary and suggestions
//!
//! KPIs, trend and summary are de-duplicated: concurrent identical calls
//! share a single request. Suggestions are generated per call and always
//! dispatched.

use ecotrack_common::validation::{date_range, positive_id, required};
use ecotrack_common::Validator;
use ecotrack_domain::{KpisResponse, SuggestionResponse, SummaryResponse, TrendGrain, TrendPoint};
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::errors::ApiError;
use super::{finish_validation, shape, unit};
use crate::http::RequestDescriptor;

const KPI_FIELDS: &[&str] = &["total_co2e_kg", "scope1_kg", "scope2_kg", "scope3_kg"];
const TREND_FIELDS: &[&str] = &["period", "co2e_kg"];
const SUMMARY_FIELDS: &[&str] = &["total_co2e_kg", "facilities_count"];
const SUGGESTION_FIELDS: &[&str] = &["message"];

pub struct AnalyticsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AnalyticsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Emission totals by scope between `from` and `to`
    #[instrument(skip(self))]
    pub async fn kpis(&self, from: &str, to: &str) -> Result<KpisResponse, ApiError> {
        check_window("analytics.kpis", from, to)?;

        let descriptor =
            RequestDescriptor::get("/v1/analytics/kpis").query("from", from).query("to", to).build();
        let value = self.client.fetch_json_deduped(descriptor).await?;

        shape::expect_fields(&value, "kpis", KPI_FIELDS)?;
        shape::decode(value, "kpis")
    }

    /// Emission time series; the backend picks the grain when `grain` is unset
    #[instrument(skip(self))]
    pub async fn trend(
        &self,
        from: &str,
        to: &str,
        grain: Option<TrendGrain>,
    ) -> Result<Vec<TrendPoint>, ApiError> {
        check_window("analytics.trend", from, to)?;

        let descriptor = RequestDescriptor::get("/v1/analytics/trend")
            .query("from", from)
            .query("to", to)
            .query_opt("grain", grain.map(|g| g.as_str()))
            .build();
        let value = self.client.fetch_json_deduped(descriptor).await?;

        shape::expect_records(&value, "trend", TREND_FIELDS)?;
        let points: Vec<TrendPoint> = shape::decode(value, "trend")?;
        debug!(points = points.len(), "trend loaded");
        Ok(points)
    }

    /// Tenant-wide totals and top categories
    #[instrument(skip(self))]
    pub async fn summary(&self) -> Result<SummaryResponse, ApiError> {
        let value = self
            .client
            .fetch_json_deduped(RequestDescriptor::get("/v1/analytics/summary").build())
            .await?;

        shape::expect_fields(&value, "summary", SUMMARY_FIELDS)?;
        shape::decode(value, "summary")
    }

    /// Reduction advice for organization `org_id`, requested as `user_id`
    #[instrument(skip(self))]
    pub async fn suggestion(
        &self,
        org_id: i64,
        user_id: i64,
    ) -> Result<SuggestionResponse, ApiError> {
        let mut validator = Validator::new().stop_on_first_error();
        validator
            .check("id", positive_id(org_id, "Organization id must be a positive id"))
            .check("user_id", positive_id(user_id, "User id must be a positive id"));
        finish_validation("analytics.suggestion", validator)?;

        let descriptor = RequestDescriptor::get("/v1/analytics/suggestion")
            .query("id", org_id)
            .query("user_id", user_id)
            .build();
        let value = self.client.fetch_json(&descriptor).await?;

        shape::expect_fields(&value, "suggestion", SUGGESTION_FIELDS)?;
        shape::decode(value, "suggestion")
    }
}

fn check_window(operation: &'static str, from: &str, to: &str) -> Result<(), ApiError> {
    let mut validator = Validator::new().stop_on_first_error();
    validator
        .check("from", required(from, "from date is required"))
        .check("to", required(to, "to date is required"))
        .check("from", unit(date_range(from, to)));
    finish_validation(operation, validator)
}
