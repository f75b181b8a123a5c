//! API client shared by the domain modules
//!
//! Owns the HTTP client, the session bookkeeping and the in-flight map for
//! de-duplicated reads. Hand it around in an `Arc`; every domain module
//! borrows it.

use std::time::Instant;

use ecotrack_core::SessionManager;
use ecotrack_domain::{ApiConfig, Config};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::activities::ActivitiesApi;
use super::analytics::AnalyticsApi;
use super::auth::AuthApi;
use super::coalesce::RequestCoalescer;
use super::emissions::EmissionsApi;
use super::errors::ApiError;
use super::factors::FactorsApi;
use super::ingest::IngestApi;
use super::reports::ReportsApi;
use super::shape;
use super::tenants::TenantsApi;
use crate::http::{HttpClient, HttpResponse, RequestDescriptor};
use crate::observability::log_request_outcome;
use crate::session::{build_session_manager, MemorySessionStore};

/// Context object for the EcoTrack REST API
#[derive(Debug)]
pub struct ApiClient {
    http: HttpClient,
    session: SessionManager,
    deduped: RequestCoalescer<Value>,
}

impl ApiClient {
    /// Create a client over an existing HTTP client and session
    ///
    /// A token already in the session store becomes the in-memory default.
    pub fn new(http: HttpClient, session: SessionManager) -> Self {
        match session.token() {
            Ok(Some(token)) => http.set_session_token(Some(&token)),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "could not read stored session token"),
        }
        Self { http, session, deduped: RequestCoalescer::new() }
    }

    /// Create a client from the full application configuration
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::builder().config(config.api.clone()).session(build_session_manager(&config.session)).build()
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// In-flight map used by de-duplicated reads
    pub fn in_flight(&self) -> &RequestCoalescer<Value> {
        &self.deduped
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn activities(&self) -> ActivitiesApi<'_> {
        ActivitiesApi::new(self)
    }

    pub fn analytics(&self) -> AnalyticsApi<'_> {
        AnalyticsApi::new(self)
    }

    pub fn factors(&self) -> FactorsApi<'_> {
        FactorsApi::new(self)
    }

    pub fn ingest(&self) -> IngestApi<'_> {
        IngestApi::new(self)
    }

    pub fn tenants(&self) -> TenantsApi<'_> {
        TenantsApi::new(self)
    }

    pub fn reports(&self) -> ReportsApi<'_> {
        ReportsApi::new(self)
    }

    pub fn emissions(&self) -> EmissionsApi<'_> {
        EmissionsApi::new(self)
    }

    /// Dispatch `descriptor` and classify any failure
    #[instrument(skip(self, descriptor), fields(operation = %descriptor.operation()))]
    pub async fn execute(&self, descriptor: &RequestDescriptor) -> Result<HttpResponse, ApiError> {
        let started = Instant::now();
        let outcome = self.http.send(descriptor).await.map_err(ApiError::from);
        log_request_outcome(&descriptor.operation(), started.elapsed(), &outcome);
        outcome
    }

    /// Dispatch and parse the body as JSON
    pub async fn fetch_json(&self, descriptor: &RequestDescriptor) -> Result<Value, ApiError> {
        let response = self.execute(descriptor).await?;
        shape::parse_body(&response.body)
    }

    /// Like [`fetch_json`](Self::fetch_json), sharing the request with any
    /// identical one already in flight
    pub async fn fetch_json_deduped(&self, descriptor: RequestDescriptor) -> Result<Value, ApiError> {
        let key = descriptor.dedup_key();
        let http = self.http.clone();

        self.deduped
            .fetch_deduped(&key, move || async move {
                let started = Instant::now();
                let outcome = http.send(&descriptor).await.map_err(ApiError::from);
                log_request_outcome(&descriptor.operation(), started.elapsed(), &outcome);
                shape::parse_body(&outcome?.body)
            })
            .await
    }

    /// Dispatch and return the body as text
    pub async fn fetch_text(&self, descriptor: &RequestDescriptor) -> Result<String, ApiError> {
        Ok(self.execute(descriptor).await?.body)
    }

    /// Encode a request body
    pub fn to_json<T: Serialize>(body: &T) -> Result<Value, ApiError> {
        serde_json::to_value(body)
            .map_err(|err| ApiError::serialization("Failed to encode request body", err))
    }

    /// Persist a new session and make it the in-memory default
    pub(crate) fn start_session(&self, token: &str, user_id: Option<i64>) -> Result<(), ApiError> {
        self.session.save(token, user_id)?;
        self.http.set_session_token(Some(token));
        debug!("session started");
        Ok(())
    }

    /// Drop the session from memory and from the store
    ///
    /// The in-memory token is cleared even when the store fails.
    pub(crate) fn end_session(&self) -> Result<(), ApiError> {
        self.http.set_session_token(None);
        self.session.clear()?;
        debug!("session ended");
        Ok(())
    }
}

/// Builder for [`ApiClient`]
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    config: Option<ApiConfig>,
    session: Option<SessionManager>,
}

impl ApiClientBuilder {
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Session to use; defaults to a process-local one
    pub fn session(mut self, session: SessionManager) -> Self {
        self.session = Some(session);
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let session = self
            .session
            .unwrap_or_else(|| SessionManager::new(std::sync::Arc::new(MemorySessionStore::new())));
        let http = HttpClient::from_config(&config, session.clone())?;
        Ok(ApiClient::new(http, session))
    }
}
