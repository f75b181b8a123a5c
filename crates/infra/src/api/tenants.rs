//! Tenant administration: facilities and users

use ecotrack_common::validation::{email, required};
use ecotrack_common::{StringValidator, Validator};
use ecotrack_domain::constants::{MAX_FACILITY_NAME_CHARS, MIN_PASSWORD_CHARS};
use ecotrack_domain::{CreateFacilityRequest, CreateUserRequest, Facility, TenantUser};
use tracing::{info, instrument};

use super::client::ApiClient;
use super::errors::ApiError;
use super::{finish_validation, shape};
use crate::http::RequestDescriptor;

const FACILITY_FIELDS: &[&str] = &["id", "name"];
const USER_FIELDS: &[&str] = &["id", "email", "role", "is_active"];

pub struct TenantsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TenantsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn facilities(&self) -> Result<Vec<Facility>, ApiError> {
        let value =
            self.client.fetch_json(&RequestDescriptor::get("/v1/tenants/facilities").build()).await?;
        shape::expect_records(&value, "facilities", FACILITY_FIELDS)?;
        shape::decode(value, "facilities")
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_facility(&self, request: &CreateFacilityRequest) -> Result<Facility, ApiError> {
        let name_rule = StringValidator::new()
            .max_chars(MAX_FACILITY_NAME_CHARS)
            .message(format!("Facility name must be at most {MAX_FACILITY_NAME_CHARS} characters"));

        let mut validator = Validator::new().stop_on_first_error();
        validator
            .check("name", required(&request.name, "Facility name is required"))
            .validate_field("name", request.name.as_str(), &name_rule);
        finish_validation("tenants.create_facility", validator)?;

        let descriptor = RequestDescriptor::post("/v1/tenants/facilities")
            .json(ApiClient::to_json(request)?)
            .build();
        let value = self.client.fetch_json(&descriptor).await?;

        shape::expect_fields(&value, "facility", FACILITY_FIELDS)?;
        let facility: Facility = shape::decode(value, "facility")?;
        info!(facility_id = facility.id, "facility created");
        Ok(facility)
    }

    #[instrument(skip(self))]
    pub async fn users(&self) -> Result<Vec<TenantUser>, ApiError> {
        let value =
            self.client.fetch_json(&RequestDescriptor::get("/v1/tenants/users").build()).await?;
        shape::expect_records(&value, "users", USER_FIELDS)?;
        shape::decode(value, "users")
    }

    /// Invite a user into the caller's organization
    ///
    /// The role is passed through as-is; the backend decides which roles exist.
    #[instrument(skip(self, request), fields(email = %request.email, role = %request.role))]
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<TenantUser, ApiError> {
        let password_rule = StringValidator::new()
            .min_chars(MIN_PASSWORD_CHARS)
            .message(format!("Password must be at least {MIN_PASSWORD_CHARS} characters"));

        let mut validator = Validator::new().stop_on_first_error();
        validator
            .check("email", email(&request.email, "A valid email is required"))
            .validate_field("password", request.password.as_str(), &password_rule)
            .check("role", required(&request.role, "Role is required"));
        finish_validation("tenants.create_user", validator)?;

        let descriptor =
            RequestDescriptor::post("/v1/tenants/users").json(ApiClient::to_json(request)?).build();
        let value = self.client.fetch_json(&descriptor).await?;

        shape::expect_fields(&value, "user", USER_FIELDS)?;
        let user: TenantUser = shape::decode(value, "user")?;
        info!(user_id = user.id, "user created");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ecotrack_core::SessionManager;
    use ecotrack_domain::ApiConfig;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
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

    #[tokio::test]
    async fn facility_record_without_id_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/tenants/facilities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Plant A"},
                {"name": "Plant B"}
            ])))
            .mount(&server)
            .await;

        let err = client_for(&server).tenants().facilities().await.unwrap_err();
        assert_eq!(err, ApiError::InvalidResponse("facilities[1] is missing id".into()));
    }

    #[tokio::test]
    async fn long_facility_name_is_rejected_offline() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(201)).expect(0).mount(&server).await;

        let request = CreateFacilityRequest { name: "x".repeat(201), country: None, grid_region: None };
        let err = client_for(&server).tenants().create_facility(&request).await.unwrap_err();
        assert_eq!(err, ApiError::Validation("Facility name must be at most 200 characters".into()));
    }

    #[tokio::test]
    async fn create_facility_omits_unset_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/tenants/facilities"))
            .and(body_json(json!({"name": "Plant C", "country": "DE"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 3, "name": "Plant C", "country": "DE", "grid_region": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request =
            CreateFacilityRequest { name: "Plant C".into(), country: Some("DE".into()), grid_region: None };
        let facility = client_for(&server).tenants().create_facility(&request).await.unwrap();
        assert_eq!(facility.id, 3);
    }

    #[tokio::test]
    async fn create_user_checks_email_first() {
        let server = MockServer::start().await;
        let request = CreateUserRequest {
            email: "not-an-email".into(),
            password: "x".into(),
            role: String::new(),
        };

        let err = client_for(&server).tenants().create_user(&request).await.unwrap_err();
        assert_eq!(err, ApiError::Validation("A valid email is required".into()));
    }

    #[tokio::test]
    async fn users_decode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/tenants/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "email": "ada@eco.io", "role": "admin", "is_active": true}
            ])))
            .mount(&server)
            .await;

        let users = client_for(&server).tenants().users().await.unwrap();
        assert_eq!(users[0].role, "admin");
        assert!(users[0].is_active);
    }
}
