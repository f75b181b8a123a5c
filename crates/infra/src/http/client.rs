use std::sync::Arc;
use std::time::Duration;

use ecotrack_core::SessionManager;
use ecotrack_domain::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS, UPLOAD_FIELD_NAME, USER_AGENT,
};
use ecotrack_domain::{ApiConfig, EcoTrackError};
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, Url};
use tracing::{debug, instrument, warn};

use super::request::{RequestBody, RequestDescriptor};
use super::response::{FailedResponse, HttpResponse, TransportFailure};

/// Shared HTTP client for the EcoTrack REST API.
///
/// Holds the base URL, the default headers and the in-memory session token.
/// An explicit `Authorization` header on the descriptor is always kept.
/// Otherwise a configured session store decides: its token is attached, and
/// an empty store means no header, since another process may have logged
/// out. The in-memory token is used only without a store or when the store
/// cannot be read.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    base_url: Url,
    session: Option<SessionManager>,
    default_token: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client configured from [`ApiConfig`] reading tokens from `session`.
    pub fn from_config(config: &ApiConfig, session: SessionManager) -> Result<Self, EcoTrackError> {
        Self::builder()
            .base_url(&config.base_url)
            .timeout(Duration::from_secs(config.timeout_secs))
            .with_credentials(config.with_credentials)
            .session(session)
            .build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> Option<&SessionManager> {
        self.session.as_ref()
    }

    /// Set or clear the in-memory default bearer token.
    ///
    /// Blank tokens clear it. Takes effect on the next request.
    pub fn set_session_token(&self, token: Option<&str>) {
        let token = token.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string);
        debug!(present = token.is_some(), "updating default session token");
        *self.default_token.write() = token;
    }

    pub fn has_session_token(&self) -> bool {
        self.default_token.read().is_some()
    }

    fn resolve_bearer(&self, descriptor: &RequestDescriptor) -> Option<String> {
        if descriptor.header(AUTHORIZATION.as_str()).is_some() {
            return None;
        }

        if let Some(session) = &self.session {
            match session.token() {
                Ok(token) => return token,
                Err(err) => warn!(error = %err, "session store unreadable; using in-memory token"),
            }
        }

        self.default_token.read().clone()
    }

    fn url_for(&self, descriptor: &RequestDescriptor) -> Result<Url, TransportFailure> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{}{}", base, descriptor.path()))
            .map_err(|err| TransportFailure::not_sent(format!("Invalid request URL: {err}")))?;

        if !descriptor.query().is_empty() {
            url.query_pairs_mut().extend_pairs(descriptor.query());
        }

        Ok(url)
    }

    /// Dispatch one request.
    ///
    /// 2xx responses come back as [`HttpResponse`]; any other status and any
    /// transport error come back as a [`TransportFailure`]. No retries.
    #[instrument(skip(self, descriptor), fields(method = %descriptor.method(), path = %descriptor.path()))]
    pub async fn send(&self, descriptor: &RequestDescriptor) -> Result<HttpResponse, TransportFailure> {
        let url = self.url_for(descriptor)?;
        let method = descriptor.method().clone();

        let mut builder = self.client.request(method.clone(), url.clone());

        for (name, value) in descriptor.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(token) = self.resolve_bearer(descriptor) {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        if let Some(timeout) = descriptor.timeout() {
            builder = builder.timeout(timeout);
        }

        builder = match descriptor.body() {
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Multipart(file)) => {
                let part = Part::bytes(file.contents.clone())
                    .file_name(file.file_name.clone())
                    .mime_str("text/csv")?;
                builder.multipart(Form::new().part(UPLOAD_FIELD_NAME, part))
            }
            None => builder,
        };

        debug!(%method, %url, "sending HTTP request");

        let response = builder.send().await.map_err(|err| {
            debug!(%method, %url, error = %err, "HTTP request failed");
            TransportFailure::from(err)
        })?;

        let status = response.status();
        let status_text = status.canonical_reason().map(str::to_string);
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        debug!(%method, %url, %status, "received HTTP response");

        let body = response.text().await?;

        if status.is_success() {
            Ok(HttpResponse { status: status.as_u16(), status_text, content_type, body })
        } else {
            Err(TransportFailure::from_response(FailedResponse {
                status: status.as_u16(),
                status_text,
                body,
            }))
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_session_token", &self.has_session_token())
            .finish()
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<HeaderMap>,
    with_credentials: bool,
    session: Option<SessionManager>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: Some(USER_AGENT.to_string()),
            default_headers: None,
            with_credentials: true,
            session: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Replace the default `Content-Type: application/json` header set
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Keep cookies between requests (credentialed requests)
    pub fn with_credentials(mut self, enabled: bool) -> Self {
        self.with_credentials = enabled;
        self
    }

    /// Durable session the client reads tokens from
    pub fn session(mut self, session: SessionManager) -> Self {
        self.session = Some(session);
        self
    }

    pub fn build(self) -> Result<HttpClient, EcoTrackError> {
        let base_url = Url::parse(&self.base_url).map_err(|err| {
            EcoTrackError::Config(format!("invalid API base URL '{}': {err}", self.base_url))
        })?;

        let headers = self.default_headers.unwrap_or_else(|| {
            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            headers
        });

        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .no_proxy()
            .default_headers(headers)
            .cookie_store(self.with_credentials);

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| {
            EcoTrackError::Config(format!("failed to build HTTP client: {err}"))
        })?;

        Ok(HttpClient {
            client,
            base_url,
            session: self.session,
            default_token: Arc::new(RwLock::new(None)),
        })
    }
}
