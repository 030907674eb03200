//! Reference lookup building.
//!
//! Responsibilities:
//! - Turn vendor reference rows into SKU and service-plan name maps.
//! - Materialize lookup rows for the SKUs a tenant actually subscribes to.
//!
//! Does NOT handle:
//! - CSV parsing (see `reference`) or network calls.
//!
//! Invariants:
//! - The first row for an id wins; later rows are skipped, never merged.
//! - Blank ids are skipped with a warning.
//! - Only repeats with a different name count as conflicts in the stats.

use std::collections::{HashMap, HashSet};

use graph_client::SubscribedSku;
use tracing::{debug, info, warn};

use crate::catalog::{ServicePlanRecord, SkuRecord};
use crate::reference::ReferenceRow;

/// Which lookup map a skipped duplicate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Sku,
    ServicePlan,
}

/// A repeated id whose later row carried a different display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDuplicate {
    pub kind: LookupKind,
    pub id: String,
    pub kept: String,
    pub skipped: String,
}

/// Counters gathered while building the maps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupBuildStats {
    pub rows: usize,
    pub blank_sku_ids: usize,
    pub blank_service_plan_ids: usize,
    pub conflicts: Vec<SkippedDuplicate>,
}

/// SKU id and service-plan id name maps built from the reference table.
#[derive(Debug, Clone, Default)]
pub struct ReferenceLookups {
    pub sku_names: HashMap<String, String>,
    pub service_plan_names: HashMap<String, String>,
    pub stats: LookupBuildStats,
}

fn insert_first_wins(
    map: &mut HashMap<String, String>,
    kind: LookupKind,
    id: &str,
    name: &str,
    conflicts: &mut Vec<SkippedDuplicate>,
) {
    match map.get(id) {
        None => {
            map.insert(id.to_string(), name.to_string());
        }
        Some(kept) if kept == name => {
            debug!(?kind, id, "Skipping repeated reference id");
        }
        Some(kept) => {
            warn!(
                ?kind,
                id,
                kept = %kept,
                skipped = name,
                "Conflicting display name for reference id; keeping first"
            );
            conflicts.push(SkippedDuplicate {
                kind,
                id: id.to_string(),
                kept: kept.clone(),
                skipped: name.to_string(),
            });
        }
    }
}

/// Build name maps from vendor reference rows.
///
/// The SKU half and the service-plan half of each row are handled
/// independently, so a row with a blank plan id still contributes its SKU.
pub fn build_reference_lookups(rows: &[ReferenceRow]) -> ReferenceLookups {
    let mut lookups = ReferenceLookups::default();
    lookups.stats.rows = rows.len();

    for (index, row) in rows.iter().enumerate() {
        let line = index + 2;

        let guid = row.guid.trim();
        if guid.is_empty() {
            warn!(line, "Reference row has a blank GUID; skipping its SKU");
            lookups.stats.blank_sku_ids += 1;
        } else {
            let name = first_non_blank(&[&row.product_display_name, &row.string_id], guid);
            insert_first_wins(
                &mut lookups.sku_names,
                LookupKind::Sku,
                guid,
                name,
                &mut lookups.stats.conflicts,
            );
        }

        let plan_id = row.service_plan_id.trim();
        if plan_id.is_empty() {
            warn!(line, "Reference row has a blank Service_Plan_Id; skipping its plan");
            lookups.stats.blank_service_plan_ids += 1;
        } else {
            let name = first_non_blank(
                &[&row.service_plan_friendly_name, &row.service_plan_name],
                plan_id,
            );
            insert_first_wins(
                &mut lookups.service_plan_names,
                LookupKind::ServicePlan,
                plan_id,
                name,
                &mut lookups.stats.conflicts,
            );
        }
    }

    info!(
        skus = lookups.sku_names.len(),
        service_plans = lookups.service_plan_names.len(),
        conflicts = lookups.stats.conflicts.len(),
        "Built reference lookups"
    );
    lookups
}

fn first_non_blank<'a>(candidates: &[&'a String], fallback: &'a str) -> &'a str {
    candidates
        .iter()
        .map(|c| c.trim())
        .find(|c| !c.is_empty())
        .unwrap_or(fallback)
}

/// Lookup rows for a tenant's subscribed SKUs and their bundled plans.
///
/// Names come from the reference maps, falling back to the part number or
/// plan name Graph reports. Rows are de-duplicated by id, first wins.
pub fn materialize_lookup_rows(
    skus: &[SubscribedSku],
    lookups: &ReferenceLookups,
) -> (Vec<SkuRecord>, Vec<ServicePlanRecord>) {
    let mut sku_rows = Vec::new();
    let mut plan_rows = Vec::new();
    let mut seen_skus = HashSet::new();
    let mut seen_plans = HashSet::new();

    for sku in skus {
        if !seen_skus.insert(sku.sku_id.as_str()) {
            continue;
        }
        let display_name = lookups
            .sku_names
            .get(&sku.sku_id)
            .cloned()
            .unwrap_or_else(|| {
                debug!(sku_id = %sku.sku_id, part = %sku.sku_part_number, "SKU not in reference table");
                sku.sku_part_number.clone()
            });
        sku_rows.push(SkuRecord {
            sku_id: sku.sku_id.clone(),
            sku_part_number: sku.sku_part_number.clone(),
            display_name,
            monthly_price: None,
            currency: None,
        });

        for plan in &sku.service_plans {
            if !seen_plans.insert(plan.service_plan_id.as_str()) {
                continue;
            }
            let display_name = lookups
                .service_plan_names
                .get(&plan.service_plan_id)
                .cloned()
                .unwrap_or_else(|| plan.service_plan_name.clone());
            plan_rows.push(ServicePlanRecord {
                service_plan_id: plan.service_plan_id.clone(),
                service_plan_name: plan.service_plan_name.clone(),
                display_name,
            });
        }
    }

    (sku_rows, plan_rows)
}
