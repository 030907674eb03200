//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::path::Path;

#[allow(unused_imports)]
pub use graph_client::{AuthStrategy, GraphClient, endpoints};
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use secrecy::SecretString;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Tenant used by client-credentials tests.
#[allow(dead_code)]
pub const TENANT: &str = "contoso.onmicrosoft.com";

/// Load a JSON fixture by path relative to `fixtures/`.
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let full_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// Client authenticating with a static bearer token against `server`.
#[allow(dead_code)]
pub fn static_token_client(server: &MockServer) -> GraphClient {
    GraphClient::builder()
        .base_url(server.uri())
        .auth_strategy(AuthStrategy::AccessToken {
            token: SecretString::new("static-token".to_string().into()),
        })
        .max_retries(2)
        .build()
        .expect("client should build")
}

/// Client using the client-credentials grant, with `server` as both the
/// Graph root and the token authority.
#[allow(dead_code)]
pub fn client_credentials_client(server: &MockServer) -> GraphClient {
    GraphClient::builder()
        .base_url(server.uri())
        .authority_url(server.uri())
        .auth_strategy(AuthStrategy::ClientCredentials {
            tenant_id: TENANT.to_string(),
            client_id: "11111111-2222-3333-4444-555555555555".to_string(),
            client_secret: SecretString::new("app-secret".to_string().into()),
        })
        .max_retries(2)
        .build()
        .expect("client should build")
}

/// Token response body carrying `token`.
#[allow(dead_code)]
pub fn token_body(token: &str) -> serde_json::Value {
    let mut body = load_fixture("auth/token_success.json");
    body["access_token"] = serde_json::json!(token);
    body
}
