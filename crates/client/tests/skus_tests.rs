//! Subscribed SKU listing tests.
//!
//! # Invariants
//! - Null collections in the payload deserialize as empty
//! - `@odata.nextLink` is followed until absent

mod common;

use common::*;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};

#[tokio::test]
async fn test_list_subscribed_skus() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscribedSkus"))
        .and(header("Authorization", "Bearer static-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("skus/subscribed_skus.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = static_token_client(&mock_server);
    let skus = client.list_subscribed_skus().await.unwrap();

    assert_eq!(skus.len(), 2);
    assert_eq!(skus[0].sku_part_number, "ENTERPRISEPREMIUM");
    assert_eq!(skus[0].prepaid_units.enabled, 25);
    assert_eq!(skus[0].consumed_units, 14);
    assert_eq!(skus[0].service_plans.len(), 2);
    assert_eq!(skus[1].capability_status.as_deref(), Some("Suspended"));
    assert!(skus[1].service_plans.is_empty());
}

#[tokio::test]
async fn test_list_subscribed_skus_follows_next_link() {
    let mock_server = MockServer::start().await;

    let mut first = load_fixture("skus/subscribed_skus.json");
    let second_value = first["value"][1].clone();
    first["value"] = serde_json::json!([first["value"][0].clone()]);
    first["@odata.nextLink"] =
        serde_json::json!(format!("{}/subscribedSkus?$skiptoken=page2", mock_server.uri()));

    Mock::given(method("GET"))
        .and(path("/subscribedSkus"))
        .and(query_param_is_missing("$skiptoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&first))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/subscribedSkus"))
        .and(query_param("$skiptoken", "page2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "value": [second_value] })),
        )
        .mount(&mock_server)
        .await;

    let mut client = static_token_client(&mock_server);
    let skus = client.list_subscribed_skus().await.unwrap();

    let parts: Vec<&str> = skus.iter().map(|s| s.sku_part_number.as_str()).collect();
    assert_eq!(parts, vec!["ENTERPRISEPREMIUM", "FLOW_FREE"]);
}

#[tokio::test]
async fn test_list_subscribed_skus_forbidden() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscribedSkus"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("request-id", "3c5e9f1a-0000-4000-8000-000000000001")
                .set_body_json(serde_json::json!({
                    "error": {
                        "code": "Authorization_RequestDenied",
                        "message": "Insufficient privileges to complete the operation."
                    }
                })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = static_token_client(&mock_server);
    let err = client.list_subscribed_skus().await.unwrap_err();

    match err {
        graph_client::ClientError::ApiError {
            status,
            message,
            request_id,
            ..
        } => {
            assert_eq!(status, 403);
            assert!(message.contains("Authorization_RequestDenied"));
            assert_eq!(
                request_id.as_deref(),
                Some("3c5e9f1a-0000-4000-8000-000000000001")
            );
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}
