//! Token acquisition and renewal tests.
//!
//! # Invariants
//! - Client credentials are posted as a form to `{authority}/{tenant}/oauth2/v2.0/token`
//! - A rejected credential surfaces as `AuthFailed` with the authority's description
//! - A 401 from Graph triggers exactly one token re-acquisition and retry
//! - Static tokens are never refreshed
//!
//! # What this does NOT handle
//! - Throttling retries (see retry_tests.rs)

mod common;

use common::*;
use graph_client::ClientError;
use wiremock::matchers::{body_string_contains, header, method, path};

fn token_path() -> String {
    format!("/{}/oauth2/v2.0/token", TENANT)
}

#[tokio::test]
async fn test_acquire_token_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(token_path()))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=app"))
        .and(body_string_contains("client_secret=s3cret"))
        .and(body_string_contains("scope=https%3A%2F%2Fgraph.microsoft.com%2F.default"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("auth/token_success.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let token = endpoints::acquire_token(
        &client,
        &mock_server.uri(),
        TENANT,
        "app",
        &SecretString::new("s3cret".to_string().into()),
        "https://graph.microsoft.com/.default",
        0,
        None,
    )
    .await
    .unwrap();

    assert!(token.access_token.ends_with(".first"));
    assert_eq!(token.expires_in, Some(3599));
}

#[tokio::test]
async fn test_acquire_token_invalid_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(token_path()))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(load_fixture("auth/token_invalid_client.json")),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let err = endpoints::acquire_token(
        &client,
        &mock_server.uri(),
        TENANT,
        "app",
        &SecretString::new("wrong".to_string().into()),
        "https://graph.microsoft.com/.default",
        0,
        None,
    )
    .await
    .unwrap_err();

    match err {
        ClientError::AuthFailed(message) => assert!(message.contains("AADSTS7000215")),
        other => panic!("expected AuthFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_client_acquires_token_before_first_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(token_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-1")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/subscribedSkus"))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "value": [] })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut client = client_credentials_client(&mock_server);
    client.list_subscribed_skus().await.unwrap();
    // Second call reuses the held token.
    client.list_subscribed_skus().await.unwrap();
}

#[tokio::test]
async fn test_client_reacquires_token_after_401() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(token_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-1")))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(token_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-2")))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/groups/g1"))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(load_fixture("groups/invalid_token.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/groups/g1"))
        .and(header("Authorization", "Bearer tok-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "g1",
            "displayName": "License - E3 Users"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_credentials_client(&mock_server);
    let name = client.group_display_name("g1").await.unwrap();
    assert_eq!(name, "License - E3 Users");
}

#[tokio::test]
async fn test_static_token_401_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscribedSkus"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(load_fixture("groups/invalid_token.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = static_token_client(&mock_server);
    let err = client.list_subscribed_skus().await.unwrap_err();

    assert!(err.is_auth_error());
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_acquire_token_with_static_token_fails() {
    let mock_server = MockServer::start().await;
    let mut client = static_token_client(&mock_server);

    assert!(matches!(
        client.acquire_token().await,
        Err(ClientError::AuthFailed(_))
    ));
}
