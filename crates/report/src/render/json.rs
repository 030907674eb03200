//! JSON summary for automation.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::report::{GroupedUsage, LicenseReport, SkuUsageSummary, TenantSummary};

#[derive(Serialize)]
struct SummaryDocument<'a> {
    generated_at: DateTime<Utc>,
    pricing_enabled: bool,
    currency: Option<&'a str>,
    summary: &'a TenantSummary,
    sku_usage: &'a [SkuUsageSummary],
    departments: &'a [GroupedUsage],
    countries: &'a [GroupedUsage],
}

/// Aggregates and tenant counters as pretty-printed JSON, without user rows.
pub fn render_summary_json(report: &LicenseReport) -> Result<String> {
    let document = SummaryDocument {
        generated_at: report.generated_at,
        pricing_enabled: report.pricing_enabled,
        currency: report.currency.as_deref(),
        summary: &report.summary,
        sku_usage: &report.sku_usage,
        departments: &report.departments,
        countries: &report.countries,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
