//! Shared test utilities for license-cli integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Write the lookup CSVs a report run reads.
//!
//! Invariants / Assumptions:
//! - `GRAPH_ACCESS_TOKEN` is set to "test-token" unless overridden.

use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// Returns a hermetic `license-cli` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `GRAPH_ACCESS_TOKEN` is set to a dummy value to satisfy config validation.
/// - Other connection and path variables are cleared so the host cannot leak in.
pub fn license_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("license-cli");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("GRAPH_ACCESS_TOKEN", "test-token");

    for var in [
        "GRAPH_BASE_URL",
        "GRAPH_AUTHORITY_URL",
        "GRAPH_TENANT_ID",
        "GRAPH_CLIENT_ID",
        "GRAPH_CLIENT_SECRET",
        "GRAPH_TIMEOUT",
        "GRAPH_MAX_RETRIES",
        "GRAPH_SKIP_VERIFY",
        "GRAPH_PAGE_SIZE",
        "GRAPH_PROFILE",
        "GRAPH_CONFIG_PATH",
        "GRAPH_OTLP_ENDPOINT",
        "GRAPH_METRICS_BIND",
        "LICENSE_REFERENCE_CSV",
        "LICENSE_SKU_CSV",
        "LICENSE_SERVICE_PLAN_CSV",
        "LICENSE_OUTPUT_DIR",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }

    cmd
}

/// Returns a hermetic command pointed at a mock Graph server.
#[allow(dead_code)]
pub fn license_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = license_cmd();
    cmd.env("GRAPH_BASE_URL", base_url);
    cmd
}

#[allow(dead_code)]
pub const SKU_LOOKUP: &str = "SkuId,SkuPartNumber,DisplayName,Price,Currency\n\
sku-a,PART_A,Plan A,10.00,USD\n\
sku-b,PART_B,Plan B,,\n";

#[allow(dead_code)]
pub const SERVICE_PLAN_LOOKUP: &str = "ServicePlanId,ServicePlanName,ServicePlanDisplayName\n\
plan-1,EXCHANGE_S_STANDARD,Exchange Online\n";

/// Write both lookup CSVs into `dir`, returning (sku, service plan) paths.
#[allow(dead_code)]
pub fn write_lookups(dir: &Path) -> (PathBuf, PathBuf) {
    let sku = dir.join("SkuLookup.csv");
    let plans = dir.join("ServicePlanLookup.csv");
    std::fs::write(&sku, SKU_LOOKUP).expect("write SKU lookup");
    std::fs::write(&plans, SERVICE_PLAN_LOOKUP).expect("write service plan lookup");
    (sku, plans)
}
