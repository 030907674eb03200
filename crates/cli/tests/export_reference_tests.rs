//! Integration tests for `license-cli export-reference`.

mod common;

use common::{license_cmd, license_cmd_with_base_url};
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REFERENCE: &str = "\u{feff}Product_Display_Name,String_Id,GUID,Service_Plan_Name,Service_Plan_Id,Service_Plans_Included_Friendly_Names\n\
Plan A,PART_A,sku-a,EXCHANGE_S_STANDARD,plan-1,Exchange Online\n\
Plan A,PART_A,sku-a,TEAMS1,plan-2,Microsoft Teams\n\
Plan C,PART_C,sku-c,SWAY,plan-3,Sway\n";

async fn mount_subscribed_skus(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/subscribedSkus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {
                    "skuId": "sku-a",
                    "skuPartNumber": "PART_A",
                    "consumedUnits": 3,
                    "prepaidUnits": { "enabled": 5 },
                    "servicePlans": [
                        { "servicePlanId": "plan-1", "servicePlanName": "EXCHANGE_S_STANDARD" },
                        { "servicePlanId": "plan-2", "servicePlanName": "TEAMS1" }
                    ]
                },
                {
                    "skuId": "sku-x",
                    "skuPartNumber": "PART_X",
                    "consumedUnits": 0,
                    "prepaidUnits": { "enabled": 1 },
                    "servicePlans": null
                }
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_export_writes_both_lookups() {
    let server = MockServer::start().await;
    mount_subscribed_skus(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("reference.csv");
    std::fs::write(&reference, REFERENCE).unwrap();
    let sku_csv = dir.path().join("SkuLookup.csv");
    let plan_csv = dir.path().join("ServicePlanLookup.csv");

    license_cmd_with_base_url(&server.uri())
        .args(["export-reference", "--quiet", "--reference-csv"])
        .arg(&reference)
        .arg("--sku-csv")
        .arg(&sku_csv)
        .arg("--service-plan-csv")
        .arg(&plan_csv)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Wrote 2 SKUs"))
        .stdout(predicate::str::contains("Wrote 2 service plans"));

    let skus = std::fs::read_to_string(&sku_csv).unwrap();
    assert!(skus.starts_with("SkuId,SkuPartNumber,DisplayName,Price,Currency"));
    assert!(skus.contains("sku-a,PART_A,Plan A,,"));
    assert!(!skus.contains("sku-c"));

    let plans = std::fs::read_to_string(&plan_csv).unwrap();
    assert!(plans.contains("plan-1,EXCHANGE_S_STANDARD,Exchange Online"));
    assert!(plans.contains("plan-2,TEAMS1,Microsoft Teams"));
    assert!(!plans.contains("plan-3"));
}

#[tokio::test]
async fn test_export_keeps_existing_prices() {
    let server = MockServer::start().await;
    mount_subscribed_skus(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("reference.csv");
    std::fs::write(&reference, REFERENCE).unwrap();
    let sku_csv = dir.path().join("SkuLookup.csv");
    let plan_csv = dir.path().join("ServicePlanLookup.csv");
    std::fs::write(
        &sku_csv,
        "SkuId,SkuPartNumber,DisplayName,Price,Currency\n\
sku-a,PART_A,Plan A,7.50,NOK\n\
sku-gone,PART_GONE,Gone,99.00,NOK\n",
    )
    .unwrap();

    license_cmd_with_base_url(&server.uri())
        .args(["export-reference", "--quiet", "--reference-csv"])
        .arg(&reference)
        .arg("--sku-csv")
        .arg(&sku_csv)
        .arg("--service-plan-csv")
        .arg(&plan_csv)
        .assert()
        .code(0);

    let skus = std::fs::read_to_string(&sku_csv).unwrap();
    assert!(skus.contains("sku-a,PART_A,Plan A,7.50,NOK"));
    assert!(!skus.contains("sku-gone"));
}

#[test]
fn test_missing_reference_table_exits_with_validation_code() {
    let dir = tempfile::tempdir().unwrap();

    license_cmd()
        .args(["export-reference", "--quiet", "--reference-csv"])
        .arg(dir.path().join("missing.csv"))
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Failed to load reference table"));
}
