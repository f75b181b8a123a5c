//! CSV period reports

use ecotrack_common::validation::{date_range, required};
use ecotrack_common::Validator;
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::errors::ApiError;
use super::{finish_validation, unit};
use crate::http::RequestDescriptor;

pub struct ReportsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ReportsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Emissions for the period as CSV text, returned verbatim
    #[instrument(skip(self))]
    pub async fn period(&self, from: &str, to: &str) -> Result<String, ApiError> {
        let mut validator = Validator::new().stop_on_first_error();
        validator
            .check("from", required(from, "from date is required"))
            .check("to", required(to, "to date is required"))
            .check("from", unit(date_range(from, to)));
        finish_validation("reports.period", validator)?;

        let descriptor = RequestDescriptor::get("/v1/reports/period")
            .query("from", from)
            .query("to", to)
            .accept("text/csv")
            .build();
        let csv = self.client.fetch_text(&descriptor).await?;
        debug!(bytes = csv.len(), "report downloaded");
        Ok(csv)
    }
}
