//! Report renderers.
//!
//! Each renderer returns the full document as a `String`; callers decide
//! where it goes.

mod csv;
mod html;
mod json;

pub use self::csv::{CSV_COLUMNS, COST_COLUMNS, render_csv};
pub use self::html::{escape_html, render_html};
pub use self::json::render_summary_json;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Separator for multi-valued cells.
pub const LIST_SEPARATOR: &str = "; ";

pub(crate) fn join_list(items: &[String]) -> String {
    items.join(LIST_SEPARATOR)
}

pub(crate) fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

pub(crate) fn format_money(value: Option<Decimal>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

pub(crate) fn format_enabled(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "Enabled",
        Some(false) => "Disabled",
        None => "",
    }
}
