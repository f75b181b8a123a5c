//! Activity ingestion: JSON event batches and CSV uploads

use ecotrack_common::validation::{iso_date, positive_id, required};
use ecotrack_common::{CollectionValidator, Validator};
use ecotrack_domain::constants::{MAX_INGEST_EVENTS, MAX_UPLOAD_BYTES, MIN_INGEST_EVENTS};
use ecotrack_domain::{ActivityEvent, IngestEventsRequest, IngestResponse, UploadFile};
use tracing::{info, instrument};

use super::client::ApiClient;
use super::errors::ApiError;
use super::{finish_validation, shape, unit};
use crate::http::RequestDescriptor;

const INGEST_FIELDS: &[&str] = &["created_events", "skipped_duplicates", "created_emissions"];

pub struct IngestApi<'a> {
    client: &'a ApiClient,
}

impl<'a> IngestApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Submit a batch of activity events
    #[instrument(skip(self, request), fields(events = request.events.len()))]
    pub async fn ingest_events(
        &self,
        request: &IngestEventsRequest,
    ) -> Result<IngestResponse, ApiError> {
        let mut validator = Validator::new().stop_on_first_error();
        let batch_size = CollectionValidator::new()
            .min_size(MIN_INGEST_EVENTS)
            .max_size(MAX_INGEST_EVENTS)
            .message(format!(
                "events must contain between {MIN_INGEST_EVENTS} and {MAX_INGEST_EVENTS} items"
            ));
        validator.validate_field("events", &request.events, &batch_size);
        for (index, event) in request.events.iter().enumerate() {
            validator.validate_nested(&format!("events[{index}]"), |v| check_event(v, event));
        }
        finish_validation("ingest.events", validator)?;

        let descriptor =
            RequestDescriptor::post("/v1/ingest/events").json(ApiClient::to_json(request)?).build();
        self.submit(&descriptor).await
    }

    /// Upload a CSV file of activities
    ///
    /// Files over the upload limit are rejected before the multipart body
    /// is built.
    #[instrument(skip(self, file), fields(file_name = %file.file_name, bytes = file.len()))]
    pub async fn upload_csv(&self, file: UploadFile) -> Result<IngestResponse, ApiError> {
        let mut validator = Validator::new().stop_on_first_error();
        validator
            .check("file", check_upload_size(file.len()))
            .check("file_name", required(&file.file_name, "File name is required"));
        if file.is_empty() {
            validator.add_error("file", "File is empty");
        }
        finish_validation("ingest.upload_csv", validator)?;

        let descriptor = RequestDescriptor::post("/v1/ingest/upload-csv").multipart(file).build();
        self.submit(&descriptor).await
    }

    async fn submit(&self, descriptor: &RequestDescriptor) -> Result<IngestResponse, ApiError> {
        let value = self.client.fetch_json(descriptor).await?;
        shape::expect_fields(&value, "ingest result", INGEST_FIELDS)?;
        let result: IngestResponse = shape::decode(value, "ingest result")?;
        info!(
            created_events = result.created_events,
            skipped_duplicates = result.skipped_duplicates,
            created_emissions = result.created_emissions,
            "ingest accepted"
        );
        Ok(result)
    }
}

pub(crate) fn check_event(validator: &mut Validator, event: &ActivityEvent) {
    match event.facility_id {
        Some(id) => {
            validator.check("facility_id", positive_id(id, "facility_id must be a positive id"));
        }
        None => validator.add_error("facility_id", "facility_id is required"),
    }
    validator
        .check("category", required(&event.category, "category is required"))
        .check("occurred_at", unit(iso_date(&event.occurred_at, "occurred_at")));
}

/// Fails unless `bytes` fits the upload limit
pub fn check_upload_size(bytes: u64) -> Result<(), String> {
    if bytes > MAX_UPLOAD_BYTES {
        return Err(format!(
            "File exceeds the {} MB upload limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        ));
    }
    Ok(())
}
