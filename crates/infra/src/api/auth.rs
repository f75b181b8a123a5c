//! Authentication: signup, login, current user, logout
//!
//! A successful signup or login persists the session token (and the user id
//! when the backend returns one) and makes it the default bearer token.

use ecotrack_common::validation::{email, required};
use ecotrack_common::{StringValidator, Validator};
use ecotrack_domain::constants::MIN_PASSWORD_CHARS;
use ecotrack_domain::{LoginRequest, MeResponse, SignupRequest, TokenResponse};
use tracing::{info, instrument, warn};

use super::client::ApiClient;
use super::errors::ApiError;
use super::{finish_validation, shape};
use crate::http::RequestDescriptor;

const ME_FIELDS: &[&str] = &["id", "email", "role", "org"];

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Create an organization with its first admin user and sign in
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: &SignupRequest) -> Result<TokenResponse, ApiError> {
        let mut validator = Validator::new().stop_on_first_error();
        validator
            .check("org_name", required(&request.org_name, "Organization name is required"))
            .check("email", email(&request.email, "A valid email is required"))
            .validate_field("password", request.password.as_str(), &password_rule());
        finish_validation("auth.signup", validator)?;

        let descriptor =
            RequestDescriptor::post("/v1/auth/signup").json(ApiClient::to_json(request)?).build();
        self.establish(&descriptor, "signup").await
    }

    /// Exchange credentials for a session
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        let mut validator = Validator::new().stop_on_first_error();
        validator
            .check("email", email(&request.email, "A valid email is required"))
            .check("password", required(&request.password, "Password is required"));
        finish_validation("auth.login", validator)?;

        let descriptor =
            RequestDescriptor::post("/v1/auth/login").json(ApiClient::to_json(request)?).build();
        self.establish(&descriptor, "login").await
    }

    /// Current user and organization
    ///
    /// A 401 means the stored session is no longer valid; it is cleared
    /// before the error is returned.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<MeResponse, ApiError> {
        let value = match self.client.fetch_json(&RequestDescriptor::get("/v1/auth/me").build()).await
        {
            Ok(value) => value,
            Err(err) => {
                if err.is_unauthorized() {
                    warn!("session rejected by backend, clearing it");
                    if let Err(clear_err) = self.client.end_session() {
                        warn!(error = %clear_err, "failed to clear rejected session");
                    }
                }
                return Err(err);
            }
        };

        shape::expect_fields(&value, "me", ME_FIELDS)?;
        shape::expect_fields(&value["org"], "me.org", &["id", "name", "plan"])?;
        shape::decode(value, "me")
    }

    /// Forget the local session; the backend keeps no logout state
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), ApiError> {
        self.client.end_session()?;
        info!("logged out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }

    async fn establish(
        &self,
        descriptor: &RequestDescriptor,
        what: &str,
    ) -> Result<TokenResponse, ApiError> {
        let value = self.client.fetch_json(descriptor).await?;
        shape::expect_object(&value, what)?;
        let tokens: TokenResponse = shape::decode(value, what)?;

        let Some(user_id) = tokens.user_id else {
            return Err(ApiError::InvalidResponse("Server did not provide user ID".into()));
        };
        let Some(token) = tokens.session_token() else {
            return Err(ApiError::InvalidResponse("Server did not provide a session token".into()));
        };

        self.client.start_session(&token, Some(user_id))?;
        info!(user_id, "session established");
        Ok(tokens)
    }
}

fn password_rule() -> StringValidator {
    StringValidator::new()
        .min_chars(MIN_PASSWORD_CHARS)
        .message(format!("Password must be at least {MIN_PASSWORD_CHARS} characters"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ecotrack_core::{SessionManager, SessionStore};
    use ecotrack_domain::ApiConfig;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::session::MemorySessionStore;

    fn client_for(server: &MockServer, store: Arc<MemorySessionStore>) -> ApiClient {
        ApiClient::builder()
            .config(ApiConfig { base_url: server.uri(), ..ApiConfig::default() })
            .session(SessionManager::new(store))
            .build()
            .unwrap()
    }

    fn login() -> LoginRequest {
        LoginRequest { email: "ada@eco.io".into(), password: "secret1".into() }
    }

    #[tokio::test]
    async fn login_persists_token_and_user_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/login"))
            .and(body_json(json!({"email": "ada@eco.io", "password": "secret1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user_id": 9, "access_token": "jwt-9", "token_type": "bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/auth/me"))
            .and(header("Authorization", "Bearer jwt-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 9, "email": "ada@eco.io", "role": "admin",
                "org": {"id": 1, "name": "Acme", "plan": "free"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let store = Arc::new(MemorySessionStore::new());
        let client = client_for(&server, store.clone());

        client.auth().login(&login()).await.unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("jwt-9"));
        assert_eq!(store.get("userId").unwrap().as_deref(), Some("9"));

        let me = client.auth().me().await.unwrap();
        assert_eq!(me.org.name, "Acme");
    }

    #[tokio::test]
    async fn login_without_access_token_uses_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user_id": 12})))
            .mount(&server)
            .await;

        let store = Arc::new(MemorySessionStore::new());
        let client = client_for(&server, store.clone());
        client.auth().login(&login()).await.unwrap();

        assert_eq!(store.get("token").unwrap().as_deref(), Some("user_authenticated_12"));
    }

    #[tokio::test]
    async fn login_without_user_id_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "x"})))
            .mount(&server)
            .await;

        let store = Arc::new(MemorySessionStore::new());
        let client = client_for(&server, store.clone());
        let err = client.auth().login(&login()).await.unwrap_err();

        assert_eq!(err, ApiError::InvalidResponse("Server did not provide user ID".into()));
        assert!(store.get("token").unwrap().is_none());
    }

    #[tokio::test]
    async fn signup_rejects_short_password_offline() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

        let request = SignupRequest {
            org_name: "Acme".into(),
            email: "ada@eco.io".into(),
            password: "abc".into(),
        };
        let err = client_for(&server, Arc::new(MemorySessionStore::new()))
            .auth()
            .signup(&request)
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Validation("Password must be at least 6 characters".into()));
    }

    #[tokio::test]
    async fn me_unauthorized_clears_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/auth/me"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})),
            )
            .mount(&server)
            .await;

        let store = Arc::new(MemorySessionStore::new());
        store.set("token", "stale").unwrap();
        let client = client_for(&server, store.clone());

        let err = client.auth().me().await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.detail().as_deref(), Some("Not authenticated"));
        assert!(store.get("token").unwrap().is_none());
        assert!(!client.auth().is_authenticated());
    }

    #[tokio::test]
    async fn logout_is_local() {
        let server = MockServer::start().await;
        let store = Arc::new(MemorySessionStore::new());
        store.set("token", "t").unwrap();
        store.set("userId", "3").unwrap();

        let client = client_for(&server, store.clone());
        client.auth().logout().unwrap();

        assert!(store.get("token").unwrap().is_none());
        assert!(store.get("userId").unwrap().is_none());
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }
}
