//! Calculated emissions and recomputation

use ecotrack_common::validation::{date_range, iso_date};
use ecotrack_common::Validator;
use ecotrack_domain::{Emission, EmissionsQuery, RecomputeRequest, RecomputeResponse};
use tracing::{info, instrument};

use super::client::ApiClient;
use super::errors::ApiError;
use super::{finish_validation, shape, unit};
use crate::http::RequestDescriptor;

pub struct EmissionsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> EmissionsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, query: &EmissionsQuery) -> Result<Vec<Emission>, ApiError> {
        let mut validator = Validator::new().stop_on_first_error();
        check_bounds(&mut validator, query.from.as_deref(), query.to.as_deref());
        finish_validation("emissions.list", validator)?;

        let descriptor = RequestDescriptor::get("/v1/emissions")
            .query_opt("from", query.from.as_deref())
            .query_opt("to", query.to.as_deref())
            .build();
        let value = self.client.fetch_json(&descriptor).await?;

        shape::expect_records(&value, "emissions", &["id", "co2e_kg"])?;
        shape::decode(value, "emissions")
    }

    /// Re-run emission calculation for events in the window
    #[instrument(skip(self))]
    pub async fn recompute(&self, request: &RecomputeRequest) -> Result<RecomputeResponse, ApiError> {
        let mut validator = Validator::new().stop_on_first_error();
        check_bounds(&mut validator, request.since.as_deref(), request.until.as_deref());
        finish_validation("emissions.recompute", validator)?;

        let descriptor = RequestDescriptor::post("/v1/emissions/recompute")
            .json(ApiClient::to_json(request)?)
            .build();
        let value = self.client.fetch_json(&descriptor).await?;

        shape::expect_fields(&value, "recompute result", &["recalculated_events"])?;
        let result: RecomputeResponse = shape::decode(value, "recompute result")?;
        info!(recalculated_events = result.recalculated_events, "emissions recomputed");
        Ok(result)
    }
}

/// Optional ISO bounds, ordered when both are present
fn check_bounds(validator: &mut Validator, from: Option<&str>, to: Option<&str>) {
    match (from, to) {
        (Some(from), Some(to)) => {
            validator.check("from", unit(date_range(from, to)));
        }
        (Some(from), None) => {
            validator.check("from", unit(iso_date(from, "from")));
        }
        (None, Some(to)) => {
            validator.check("to", unit(iso_date(to, "to")));
        }
        (None, None) => {}
    }
}
