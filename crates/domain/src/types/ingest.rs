//! Activity ingestion records

use serde::{Deserialize, Serialize};

/// One activity event in an ingest batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Required by the backend; optional here so a missing id is reported
    /// by validation rather than by the type system
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<i64>,
    pub category: String,
    /// ISO-8601 timestamp
    pub occurred_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_numeric: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spend_value: Option<f64>,
}

/// Body of `POST /v1/ingest/events`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestEventsRequest {
    pub events: Vec<ActivityEvent>,
}

/// Result of an ingest call (events or CSV upload)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResponse {
    pub created_events: u64,
    pub skipped_duplicates: u64,
    pub created_emissions: u64,
}

/// CSV file to upload through `POST /v1/ingest/upload-csv`
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub contents: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, contents: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), contents }
    }

    /// Size in bytes
    pub fn len(&self) -> u64 {
        self.contents.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("len", &self.contents.len())
            .finish()
    }
}
