//! Request and response records of the EcoTrack REST contract
//!
//! One module per backend resource area. Response types are tolerant of
//! additive backend changes: unknown fields are ignored or kept in `extra`.

pub mod activities;
pub mod analytics;
pub mod auth;
pub mod emissions;
pub mod factors;
pub mod ingest;
pub mod tenants;

pub use activities::{Activity, ActivityFilters, CreateActivityRequest};
pub use analytics::{
    CategoryTotal, KpisResponse, SuggestionResponse, SummaryResponse, TrendGrain, TrendPoint,
};
pub use auth::{LoginRequest, MeResponse, OrgInfo, SignupRequest, TokenResponse};
pub use emissions::{Emission, EmissionsQuery, RecomputeRequest, RecomputeResponse};
pub use factors::{CreateFactorRequest, Factor, FactorFilter, FactorPreview, FactorPreviewQuery};
pub use ingest::{ActivityEvent, IngestEventsRequest, IngestResponse, UploadFile};
pub use tenants::{CreateFacilityRequest, CreateUserRequest, Facility, TenantUser};
