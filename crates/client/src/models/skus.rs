//! Subscribed SKU models (`GET /subscribedSkus`).

use serde::{Deserialize, Serialize};

use crate::serde_helpers::null_as_default;

/// A license product the tenant has purchased.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedSku {
    /// Tenant-scoped object id (`<tenantId>_<skuId>`).
    #[serde(default)]
    pub id: String,
    pub sku_id: String,
    #[serde(default)]
    pub sku_part_number: String,
    #[serde(default)]
    pub capability_status: Option<String>,
    #[serde(default)]
    pub applies_to: Option<String>,
    #[serde(default)]
    pub consumed_units: u64,
    #[serde(default)]
    pub prepaid_units: PrepaidUnits,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_plans: Vec<ServicePlanInfo>,
}

/// Purchased unit counters for a SKU.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepaidUnits {
    #[serde(default)]
    pub enabled: u64,
    #[serde(default)]
    pub suspended: u64,
    #[serde(default)]
    pub warning: u64,
    #[serde(default)]
    pub locked_out: u64,
}

/// A service plan bundled in a SKU.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePlanInfo {
    pub service_plan_id: String,
    #[serde(default)]
    pub service_plan_name: String,
    #[serde(default)]
    pub provisioning_status: Option<String>,
    #[serde(default)]
    pub applies_to: Option<String>,
}
