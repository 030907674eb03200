//! Duplicate license assignment detection.
//!
//! A SKU is duplicated when it appears more than once across a user's active
//! direct and group-based assignments. The cause (direct plus group, or two
//! groups) is not distinguished.

use std::collections::HashMap;

use crate::catalog::SkuCatalog;

/// Text reported when a user has no duplicated SKU.
pub const NO_DUPLICATES: &str = "N/A";

/// SKU ids occurring more than once across `direct` and `group`, in first-seen order.
pub fn find_duplicate_skus<S: AsRef<str>>(direct: &[S], group: &[S]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for sku_id in direct.iter().chain(group.iter()).map(AsRef::as_ref) {
        let count = counts.entry(sku_id).or_insert(0);
        if *count == 0 {
            order.push(sku_id);
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter(|id| counts.get(id).copied().unwrap_or(0) > 1)
        .map(str::to_string)
        .collect()
}

/// Display names of `duplicates` joined with `", "`, or `"N/A"` when empty.
pub fn duplicate_warning(duplicates: &[String], skus: &SkuCatalog) -> String {
    if duplicates.is_empty() {
        return NO_DUPLICATES.to_string();
    }
    duplicates
        .iter()
        .map(|id| skus.display_name(id))
        .collect::<Vec<_>>()
        .join(", ")
}
