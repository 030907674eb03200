//! CSV rendering of the per-user rows.

use crate::error::{ReportError, Result};
use crate::report::LicenseReport;

use super::{format_enabled, format_money, format_timestamp, join_list};

/// Columns always present, in order.
pub const CSV_COLUMNS: &[&str] = &[
    "DisplayName",
    "UserPrincipalName",
    "AccountStatus",
    "Department",
    "Country",
    "JobTitle",
    "Company",
    "DirectLicenses",
    "GroupLicenses",
    "DisabledServicePlans",
    "DuplicateLicenses",
    "LicenseErrors",
    "LastSignIn",
    "DaysSinceLastSignIn",
    "InactivityStatus",
];

/// Columns appended when pricing is enabled.
pub const COST_COLUMNS: &[&str] = &["MonthlyCost", "AnnualCost"];

/// Render one CSV row per user with a header row.
pub fn render_csv(report: &LicenseReport) -> Result<String> {
    let mut buffer = Vec::new();
    {
        let mut writer = ::csv::Writer::from_writer(&mut buffer);

        let mut header: Vec<&str> = CSV_COLUMNS.to_vec();
        if report.pricing_enabled {
            header.extend_from_slice(COST_COLUMNS);
        }
        writer
            .write_record(&header)
            .map_err(|e| ReportError::csv("report header", e))?;

        for row in &report.rows {
            let mut record = vec![
                row.display_name.clone(),
                row.user_principal_name.clone(),
                format_enabled(row.account_enabled).to_string(),
                row.department.clone().unwrap_or_default(),
                row.country.clone().unwrap_or_default(),
                row.job_title.clone().unwrap_or_default(),
                row.company_name.clone().unwrap_or_default(),
                join_list(&row.direct_licenses),
                join_list(&row.group_licenses),
                join_list(&row.disabled_plans),
                row.duplicate_warning.clone(),
                join_list(&row.license_errors),
                format_timestamp(row.last_sign_in),
                row.days_since_sign_in.to_string(),
                row.inactivity.label().to_string(),
            ];
            if report.pricing_enabled {
                record.push(format_money(row.monthly_cost));
                record.push(format_money(row.annual_cost));
            }
            writer
                .write_record(&record)
                .map_err(|e| ReportError::csv("report row", e))?;
        }

        writer
            .flush()
            .map_err(|e| ReportError::csv("report", e.into()))?;
    }
    Ok(String::from_utf8(buffer)?)
}
