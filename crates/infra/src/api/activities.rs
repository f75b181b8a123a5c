//! Raw activity records
//!
//! Listing reads `/v1/activities`; creating a single activity goes through
//! the ingest endpoint as a one-event batch.

use ecotrack_common::validation::{iso_date, positive_id, required};
use ecotrack_common::Validator;
use ecotrack_domain::{Activity, ActivityFilters, CreateActivityRequest, IngestEventsRequest, IngestResponse};
use tracing::instrument;

use super::client::ApiClient;
use super::errors::ApiError;
use super::ingest::check_event;
use super::{finish_validation, shape, unit};
use crate::http::RequestDescriptor;

pub struct ActivitiesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ActivitiesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filters: &ActivityFilters) -> Result<Vec<Activity>, ApiError> {
        let mut validator = Validator::new().stop_on_first_error();
        if let Some(from) = filters.from.as_deref() {
            validator.check("from", unit(iso_date(from, "from")));
        }
        if let Some(to) = filters.to.as_deref() {
            validator.check("to", unit(iso_date(to, "to")));
        }
        if let Some(id) = filters.facility_id {
            validator.check("facility_id", positive_id(id, "facility_id must be a positive id"));
        }
        finish_validation("activities.list", validator)?;

        let descriptor = RequestDescriptor::get("/v1/activities")
            .query_opt("from", filters.from.as_deref())
            .query_opt("to", filters.to.as_deref())
            .query_opt("category", filters.category.as_deref())
            .query_opt("facility_id", filters.facility_id)
            .query_opt("limit", filters.limit)
            .query_opt("offset", filters.offset)
            .build();
        let value = self.client.fetch_json(&descriptor).await?;

        shape::expect_records(&value, "activities", &["id", "occurred_at", "category"])?;
        shape::decode(value, "activities")
    }

    #[instrument(skip(self, request), fields(category = %request.category))]
    pub async fn create(&self, request: CreateActivityRequest) -> Result<IngestResponse, ApiError> {
        let mut validator = Validator::new().stop_on_first_error();
        validator.check("unit", required(&request.unit, "unit is required"));
        let batch = IngestEventsRequest { events: vec![request.into()] };
        validator.validate_nested("events[0]", |v| check_event(v, &batch.events[0]));
        finish_validation("activities.create", validator)?;

        self.client.ingest().ingest_events(&batch).await
    }
}
