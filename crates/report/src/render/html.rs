//! Self-contained HTML report.
//!
//! The document inlines its CSS and a small script for click-to-sort
//! headers and the filter box, so it can be mailed or archived as one file.

use std::fmt::Write as _;

use rust_decimal::Decimal;

use crate::report::{GroupedUsage, LicenseReport, SkuUsageSummary, TenantSummary};

use super::{CSV_COLUMNS, COST_COLUMNS, format_enabled, format_money, format_timestamp};

const STYLE: &str = r#"
body { font-family: "Segoe UI", Arial, sans-serif; margin: 24px; color: #1b1b1b; background: #f5f6f8; }
h1 { margin-bottom: 4px; }
.meta { color: #5c6370; margin-bottom: 20px; }
.tiles { display: flex; flex-wrap: wrap; gap: 12px; margin-bottom: 24px; }
.tile { background: #fff; border-radius: 6px; padding: 12px 16px; min-width: 150px; box-shadow: 0 1px 3px rgba(0,0,0,.12); }
.tile .value { font-size: 1.6em; font-weight: 600; }
.tile .label { color: #5c6370; font-size: .85em; }
.tile.warn .value { color: #b45309; }
.tile.bad .value { color: #b91c1c; }
table { border-collapse: collapse; width: 100%; background: #fff; margin-bottom: 28px; font-size: .9em; }
th, td { border: 1px solid #d9dce1; padding: 6px 8px; text-align: left; vertical-align: top; }
th { background: #0f4c81; color: #fff; position: sticky; top: 0; }
th.sortable { cursor: pointer; }
tr:nth-child(even) td { background: #f9fafb; }
td.num { text-align: right; }
#filter { padding: 6px 8px; width: 320px; margin-bottom: 8px; }
"#;

const SCRIPT: &str = r#"
function sortTable(table, col) {
  var body = table.tBodies[0];
  var rows = Array.prototype.slice.call(body.rows);
  var asc = table.getAttribute("data-sort-col") != col || table.getAttribute("data-sort-dir") != "asc";
  rows.sort(function (a, b) {
    var x = a.cells[col].innerText, y = b.cells[col].innerText;
    var nx = parseFloat(x), ny = parseFloat(y);
    var cmp = (!isNaN(nx) && !isNaN(ny)) ? nx - ny : x.localeCompare(y);
    return asc ? cmp : -cmp;
  });
  rows.forEach(function (r) { body.appendChild(r); });
  table.setAttribute("data-sort-col", col);
  table.setAttribute("data-sort-dir", asc ? "asc" : "desc");
}
document.querySelectorAll("table.sortable").forEach(function (table) {
  Array.prototype.forEach.call(table.tHead.rows[0].cells, function (th, i) {
    th.classList.add("sortable");
    th.addEventListener("click", function () { sortTable(table, i); });
  });
});
var filter = document.getElementById("filter");
if (filter) {
  filter.addEventListener("input", function () {
    var q = filter.value.toLowerCase();
    Array.prototype.forEach.call(document.getElementById("users").tBodies[0].rows, function (r) {
      r.style.display = r.innerText.toLowerCase().indexOf(q) === -1 ? "none" : "";
    });
  });
}
"#;

/// Escape text for HTML element content and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn money(value: Option<Decimal>, currency: Option<&str>) -> String {
    match (value, currency) {
        (Some(v), Some(c)) => format!("{:.2} {}", v, c),
        (Some(v), None) => format!("{:.2}", v),
        (None, _) => "N/A".to_string(),
    }
}

fn tile(out: &mut String, label: &str, value: &str, class: &str) {
    let _ = write!(
        out,
        r#"<div class="tile {class}"><div class="value">{}</div><div class="label">{}</div></div>"#,
        escape_html(value),
        escape_html(label)
    );
}

fn tiles(out: &mut String, summary: &TenantSummary, pricing: bool, currency: Option<&str>) {
    out.push_str(r#"<div class="tiles">"#);
    tile(out, "Licensed users", &summary.total_users.to_string(), "");
    tile(out, "License assignments", &summary.total_assignments.to_string(), "");
    tile(
        out,
        "License errors",
        &summary.license_errors.to_string(),
        if summary.license_errors > 0 { "bad" } else { "" },
    );
    tile(
        out,
        "Users with duplicates",
        &summary.users_with_duplicates.to_string(),
        if summary.users_with_duplicates > 0 { "warn" } else { "" },
    );
    tile(out, "Inactive users", &summary.inactive_users.to_string(), "warn");
    tile(out, "Never logged in", &summary.never_signed_in.to_string(), "");
    if pricing {
        tile(
            out,
            "Purchased annual cost",
            &money(summary.total_purchased_annual_cost, currency),
            "",
        );
        tile(
            out,
            "Assigned annual cost",
            &money(summary.total_assigned_annual_cost, currency),
            "",
        );
        let utilization = summary
            .utilization_percent
            .map(|p| format!("{p}%"))
            .unwrap_or_else(|| "N/A".to_string());
        tile(out, "Utilization", &utilization, "");
    }
    out.push_str("</div>\n");
}

fn table_head(out: &mut String, id: &str, columns: &[&str]) {
    let _ = write!(out, r#"<table class="sortable" id="{id}"><thead><tr>"#);
    for column in columns {
        let _ = write!(out, "<th>{}</th>", escape_html(column));
    }
    out.push_str("</tr></thead><tbody>\n");
}

fn cell(out: &mut String, text: &str) {
    let _ = write!(out, "<td>{}</td>", escape_html(text));
}

fn num_cell(out: &mut String, text: &str) {
    let _ = write!(out, r#"<td class="num">{}</td>"#, escape_html(text));
}

fn sku_table(out: &mut String, usage: &[SkuUsageSummary], pricing: bool, currency: Option<&str>) {
    out.push_str("<h2>License usage by SKU</h2>\n");
    let mut columns = vec!["License", "Purchased", "Consumed", "Available"];
    if pricing {
        columns.extend(["Monthly price", "Purchased annual cost", "Assigned annual cost"]);
    }
    table_head(out, "skus", &columns);
    for sku in usage {
        out.push_str("<tr>");
        cell(out, &sku.display_name);
        num_cell(out, &sku.units_purchased.to_string());
        num_cell(out, &sku.units_consumed.to_string());
        num_cell(out, &sku.units_available.to_string());
        if pricing {
            num_cell(out, &money(sku.monthly_price, currency));
            num_cell(out, &money(sku.total_annual_cost, currency));
            num_cell(out, &money(sku.assigned_annual_cost, currency));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody></table>\n");
}

fn grouped_table(
    out: &mut String,
    title: &str,
    id: &str,
    key_label: &str,
    groups: &[GroupedUsage],
    pricing: bool,
    currency: Option<&str>,
) {
    let _ = writeln!(out, "<h2>{}</h2>", escape_html(title));
    let mut columns = vec![key_label, "Users", "Licenses"];
    if pricing {
        columns.push("Annual cost");
    }
    table_head(out, id, &columns);
    for group in groups {
        out.push_str("<tr>");
        cell(out, &group.key);
        num_cell(out, &group.users.to_string());
        num_cell(out, &group.licenses.to_string());
        if pricing {
            num_cell(out, &money(group.annual_cost, currency));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody></table>\n");
}

fn user_table(out: &mut String, report: &LicenseReport) {
    out.push_str("<h2>Users</h2>\n");
    out.push_str(r#"<input id="filter" type="search" placeholder="Filter users...">"#);
    out.push('\n');

    let mut columns: Vec<&str> = CSV_COLUMNS.to_vec();
    if report.pricing_enabled {
        columns.extend_from_slice(COST_COLUMNS);
    }
    table_head(out, "users", &columns);

    for row in &report.rows {
        out.push_str("<tr>");
        cell(out, &row.display_name);
        cell(out, &row.user_principal_name);
        cell(out, format_enabled(row.account_enabled));
        cell(out, row.department.as_deref().unwrap_or_default());
        cell(out, row.country.as_deref().unwrap_or_default());
        cell(out, row.job_title.as_deref().unwrap_or_default());
        cell(out, row.company_name.as_deref().unwrap_or_default());
        list_cell(out, &row.direct_licenses);
        list_cell(out, &row.group_licenses);
        list_cell(out, &row.disabled_plans);
        cell(out, &row.duplicate_warning);
        list_cell(out, &row.license_errors);
        cell(out, &format_timestamp(row.last_sign_in));
        num_cell(out, &row.days_since_sign_in.to_string());
        cell(out, row.inactivity.label());
        if report.pricing_enabled {
            num_cell(out, &format_money(row.monthly_cost));
            num_cell(out, &format_money(row.annual_cost));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody></table>\n");
}

fn list_cell(out: &mut String, items: &[String]) {
    let escaped: Vec<String> = items.iter().map(|i| escape_html(i)).collect();
    let _ = write!(out, "<td>{}</td>", escaped.join("<br>"));
}

/// Render the full HTML document.
pub fn render_html(report: &LicenseReport) -> String {
    let currency = report.currency.as_deref();
    let mut out = String::with_capacity(64 * 1024 + report.rows.len() * 512);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>License Report</title>\n<style>");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n<h1>License Report</h1>\n");
    let _ = writeln!(
        out,
        r#"<div class="meta">Generated {}</div>"#,
        escape_html(&report.generated_at.format("%Y-%m-%d %H:%M UTC").to_string())
    );

    tiles(&mut out, &report.summary, report.pricing_enabled, currency);
    sku_table(&mut out, &report.sku_usage, report.pricing_enabled, currency);
    grouped_table(
        &mut out,
        "Licenses by department",
        "departments",
        "Department",
        &report.departments,
        report.pricing_enabled,
        currency,
    );
    grouped_table(
        &mut out,
        "Licenses by country",
        "countries",
        "Country",
        &report.countries,
        report.pricing_enabled,
        currency,
    );
    user_table(&mut out, report);

    out.push_str("<script>");
    out.push_str(SCRIPT);
    out.push_str("</script>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"R&D" & 'Ops'</b>"#),
            "&lt;b&gt;&quot;R&amp;D&quot; &amp; &#39;Ops&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(Some(Decimal::new(12000, 2)), Some("USD")), "120.00 USD");
        assert_eq!(money(Some(Decimal::new(5, 0)), None), "5.00");
        assert_eq!(money(None, Some("USD")), "N/A");
    }

    #[test]
    fn test_currency_is_escaped_exactly_once() {
        assert_eq!(money(Some(Decimal::ONE), Some("R&D$")), "1.00 R&D$");

        let mut out = String::new();
        tile(&mut out, "Cost", &money(Some(Decimal::ONE), Some("R&D$")), "");
        assert!(out.contains("1.00 R&amp;D$"));
        assert!(!out.contains("&amp;amp;"));

        let mut cell_out = String::new();
        num_cell(&mut cell_out, &money(Some(Decimal::ONE), Some("<b>")));
        assert!(cell_out.contains("1.00 &lt;b&gt;"));
    }
}
