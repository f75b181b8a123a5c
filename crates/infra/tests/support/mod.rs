use std::net::TcpListener;
use std::sync::Arc;

use ecotrack_core::SessionManager;
use ecotrack_domain::ApiConfig;
use ecotrack_infra::{ApiClient, MemorySessionStore};
use wiremock::MockServer;

/// API client pointed at `server` with a fresh in-memory session.
pub fn client_for(server: &MockServer) -> (ApiClient, Arc<MemorySessionStore>) {
    client_at(&server.uri())
}

/// API client pointed at an arbitrary base URL.
pub fn client_at(base_url: &str) -> (ApiClient, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    let client = ApiClient::builder()
        .config(ApiConfig { base_url: base_url.to_string(), timeout_secs: 2, with_credentials: true })
        .session(SessionManager::new(store.clone()))
        .build()
        .expect("api client should build");
    (client, store)
}

/// Base URL of a local port nothing listens on.
pub fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}
