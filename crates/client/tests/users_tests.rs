//! Licensed user listing tests.
//!
//! # Invariants
//! - The first request filters on `assignedLicenses/$count ne 0` and asks for `$count`
//! - Every page is sent with `ConsistencyLevel: eventual`
//! - Paging stops when `@odata.nextLink` is absent
//!
//! # What this does NOT handle
//! - Token renewal between pages (see auth_tests.rs)

mod common;

use common::*;
use graph_client::AssignmentState;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};

async fn mount_two_pages(mock_server: &MockServer) {
    let mut first = load_fixture("users/licensed_users_page1.json");
    first["@odata.nextLink"] =
        serde_json::json!(format!("{}/users?$skiptoken=page2", mock_server.uri()));

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("$filter", "assignedLicenses/$count ne 0"))
        .and(query_param("$count", "true"))
        .and(query_param("$top", "999"))
        .and(query_param_is_missing("$skiptoken"))
        .and(header("ConsistencyLevel", "eventual"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&first))
        .expect(1)
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("$skiptoken", "page2"))
        .and(header("ConsistencyLevel", "eventual"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(load_fixture("users/licensed_users_page2.json")),
        )
        .expect(1)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_list_licensed_users_follows_pages() {
    let mock_server = MockServer::start().await;
    mount_two_pages(&mock_server).await;

    let mut client = static_token_client(&mock_server);
    let users = client.list_licensed_users().await.unwrap();

    assert_eq!(users.len(), 3);
    assert_eq!(users[0].name(), "Megan Bowen");
    assert_eq!(users[2].user_principal_name, "IsaiahL@contoso.com");
}

#[tokio::test]
async fn test_list_licensed_users_parses_assignment_details() {
    let mock_server = MockServer::start().await;
    mount_two_pages(&mock_server).await;

    let mut client = static_token_client(&mock_server);
    let users = client.list_licensed_users().await.unwrap();

    let megan = &users[0];
    assert_eq!(megan.account_enabled, Some(true));
    assert!(megan.company_name.is_none());
    let activity = megan.sign_in_activity.as_ref().unwrap();
    assert!(activity.last_sign_in_date_time.is_some());

    let adele = &users[1];
    assert!(adele.department.is_none());
    assert!(adele.sign_in_activity.is_none());
    assert_eq!(adele.license_assignment_states.len(), 2);
    assert!(adele.license_assignment_states[0].is_group_based());
    assert!(!adele.license_assignment_states[1].is_group_based());

    let isaiah = &users[2];
    let state = &isaiah.license_assignment_states[0];
    assert_eq!(state.state, AssignmentState::Error);
    assert_eq!(state.error_code(), Some("CountViolation"));
    assert!(
        isaiah
            .sign_in_activity
            .as_ref()
            .unwrap()
            .last_sign_in_date_time
            .is_none()
    );
}

#[tokio::test]
async fn test_list_licensed_users_reports_progress() {
    let mock_server = MockServer::start().await;
    mount_two_pages(&mock_server).await;

    let mut client = static_token_client(&mock_server);
    let mut progress = Vec::new();
    let users = client
        .list_licensed_users_with_progress(|fetched, total| progress.push((fetched, total)))
        .await
        .unwrap();

    assert_eq!(users.len(), 3);
    assert_eq!(progress, vec![(2, Some(3)), (3, Some(3))]);
}

#[tokio::test]
async fn test_list_licensed_users_uses_configured_page_size() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("$top", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "@odata.count": 0,
            "value": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = GraphClient::builder()
        .base_url(mock_server.uri())
        .auth_strategy(AuthStrategy::AccessToken {
            token: SecretString::new("static-token".to_string().into()),
        })
        .page_size(50)
        .build()
        .unwrap();

    let users = client.list_licensed_users().await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_list_licensed_users_rejects_malformed_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy login</html>"))
        .mount(&mock_server)
        .await;

    let mut client = static_token_client(&mock_server);
    let err = client.list_licensed_users().await.unwrap_err();
    assert!(matches!(err, graph_client::ClientError::InvalidResponse(_)));
}
