//! SKU and service-plan lookup tables.
//!
//! Responsibilities:
//! - Define the lookup CSV record types.
//! - Index records by id with a first-wins collision rule.
//! - Resolve ids to display names and monthly prices.
//!
//! Does NOT handle:
//! - Reading or writing the CSV files (see `reference`).
//!
//! Invariants:
//! - Ids are unique within a catalog; later duplicates are logged and dropped.
//! - Catalogs are immutable once built.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cost::PriceLookup;

/// One row of the SKU lookup CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuRecord {
    #[serde(rename = "SkuId")]
    pub sku_id: String,
    #[serde(rename = "SkuPartNumber", default)]
    pub sku_part_number: String,
    #[serde(rename = "DisplayName", default)]
    pub display_name: String,
    /// Monthly price per unit as entered in the CSV; parsed on use.
    #[serde(rename = "Price", default)]
    pub monthly_price: Option<String>,
    #[serde(rename = "Currency", default)]
    pub currency: Option<String>,
}

impl SkuRecord {
    /// Non-blank monthly price text.
    pub fn price_text(&self) -> Option<&str> {
        self.monthly_price
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// One row of the service-plan lookup CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePlanRecord {
    #[serde(rename = "ServicePlanId")]
    pub service_plan_id: String,
    #[serde(rename = "ServicePlanName", default)]
    pub service_plan_name: String,
    #[serde(rename = "ServicePlanDisplayName", default)]
    pub display_name: String,
}

/// SKU lookup table keyed by SKU id.
#[derive(Debug, Clone, Default)]
pub struct SkuCatalog {
    records: Vec<SkuRecord>,
    index: HashMap<String, usize>,
    pricing_enabled: bool,
}

impl SkuCatalog {
    /// Build a catalog from records in file order.
    ///
    /// Pricing is enabled iff the first record carries a non-blank price.
    pub fn from_records(records: impl IntoIterator<Item = SkuRecord>) -> Self {
        let mut catalog = Self::default();
        for (position, record) in records.into_iter().enumerate() {
            if position == 0 {
                catalog.pricing_enabled = record.price_text().is_some();
            }
            let sku_id = record.sku_id.trim().to_string();
            if sku_id.is_empty() {
                warn!(row = position + 1, "Skipping SKU lookup row with blank SkuId");
                continue;
            }
            if let Some(&existing) = catalog.index.get(&sku_id) {
                let kept = &catalog.records[existing].display_name;
                if kept == &record.display_name {
                    debug!(sku_id = %sku_id, "Skipping repeated SKU lookup row");
                } else {
                    warn!(
                        sku_id = %sku_id,
                        kept = %kept,
                        skipped = %record.display_name,
                        "Duplicate SkuId in lookup; keeping first"
                    );
                }
                continue;
            }
            catalog.index.insert(sku_id.clone(), catalog.records.len());
            catalog.records.push(SkuRecord { sku_id, ..record });
        }
        catalog
    }

    pub fn get(&self, sku_id: &str) -> Option<&SkuRecord> {
        self.index.get(sku_id).map(|&i| &self.records[i])
    }

    /// Display name for a SKU id, falling back to the part number and then the id.
    pub fn display_name<'a>(&'a self, sku_id: &'a str) -> &'a str {
        match self.get(sku_id) {
            Some(r) if !r.display_name.trim().is_empty() => &r.display_name,
            Some(r) if !r.sku_part_number.trim().is_empty() => &r.sku_part_number,
            _ => sku_id,
        }
    }

    pub fn pricing_enabled(&self) -> bool {
        self.pricing_enabled
    }

    /// First non-blank currency code in the table.
    pub fn currency(&self) -> Option<&str> {
        self.records
            .iter()
            .filter_map(|r| r.currency.as_deref().map(str::trim))
            .find(|c| !c.is_empty())
    }

    pub fn records(&self) -> &[SkuRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PriceLookup for SkuCatalog {
    fn monthly_price(&self, sku_id: &str) -> Option<&str> {
        self.get(sku_id).and_then(SkuRecord::price_text)
    }
}

/// Service-plan lookup table keyed by service-plan id.
#[derive(Debug, Clone, Default)]
pub struct ServicePlanCatalog {
    names: HashMap<String, String>,
}

impl ServicePlanCatalog {
    /// Build a catalog from records in file order; the first row for an id wins.
    pub fn from_records(records: impl IntoIterator<Item = ServicePlanRecord>) -> Self {
        let mut names: HashMap<String, String> = HashMap::new();
        for record in records {
            let plan_id = record.service_plan_id.trim();
            if plan_id.is_empty() {
                warn!("Skipping service plan lookup row with blank ServicePlanId");
                continue;
            }
            let name = if record.display_name.trim().is_empty() {
                record.service_plan_name
            } else {
                record.display_name
            };
            if let Some(kept) = names.get(plan_id) {
                if kept != &name {
                    warn!(
                        service_plan_id = plan_id,
                        kept = %kept,
                        skipped = %name,
                        "Duplicate ServicePlanId in lookup; keeping first"
                    );
                }
                continue;
            }
            names.insert(plan_id.to_string(), name);
        }
        Self { names }
    }

    /// Display name for a service-plan id, falling back to the id.
    pub fn display_name<'a>(&'a self, plan_id: &'a str) -> &'a str {
        self.names
            .get(plan_id)
            .map(String::as_str)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(plan_id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sku(id: &str, name: &str, price: Option<&str>) -> SkuRecord {
        SkuRecord {
            sku_id: id.to_string(),
            sku_part_number: format!("PART_{id}"),
            display_name: name.to_string(),
            monthly_price: price.map(str::to_string),
            currency: price.map(|_| "USD".to_string()),
        }
    }

    #[test]
    fn test_first_sku_row_wins() {
        let catalog = SkuCatalog::from_records(vec![
            sku("a", "Office 365 E3", Some("23.00")),
            sku("a", "Something Else", Some("99.00")),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.display_name("a"), "Office 365 E3");
        assert_eq!(catalog.monthly_price("a"), Some("23.00"));
    }

    #[test]
    fn test_pricing_follows_first_row_only() {
        let priced_later =
            SkuCatalog::from_records(vec![sku("a", "A", None), sku("b", "B", Some("10"))]);
        assert!(!priced_later.pricing_enabled());

        let priced_first =
            SkuCatalog::from_records(vec![sku("a", "A", Some("10")), sku("b", "B", None)]);
        assert!(priced_first.pricing_enabled());
        assert_eq!(priced_first.currency(), Some("USD"));
    }

    #[test]
    fn test_blank_price_is_not_a_price() {
        let catalog = SkuCatalog::from_records(vec![sku("a", "A", Some("   "))]);
        assert!(!catalog.pricing_enabled());
        assert_eq!(catalog.monthly_price("a"), None);
    }

    #[test]
    fn test_sku_display_name_fallbacks() {
        let catalog = SkuCatalog::from_records(vec![sku("a", "", None)]);
        assert_eq!(catalog.display_name("a"), "PART_a");
        assert_eq!(catalog.display_name("unknown"), "unknown");
    }

    #[test]
    fn test_blank_sku_id_is_skipped() {
        let catalog = SkuCatalog::from_records(vec![sku(" ", "Ghost", None), sku("a", "A", None)]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("a").is_some());
    }

    #[test]
    fn test_service_plan_catalog() {
        let catalog = ServicePlanCatalog::from_records(vec![
            ServicePlanRecord {
                service_plan_id: "p1".to_string(),
                service_plan_name: "EXCHANGE_S_ENTERPRISE".to_string(),
                display_name: "Exchange Online (Plan 2)".to_string(),
            },
            ServicePlanRecord {
                service_plan_id: "p1".to_string(),
                service_plan_name: "EXCHANGE_S_ENTERPRISE".to_string(),
                display_name: "Renamed".to_string(),
            },
            ServicePlanRecord {
                service_plan_id: "p2".to_string(),
                service_plan_name: "SWAY".to_string(),
                display_name: String::new(),
            },
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.display_name("p1"), "Exchange Online (Plan 2)");
        assert_eq!(catalog.display_name("p2"), "SWAY");
        assert_eq!(catalog.display_name("p3"), "p3");
    }
}
