//! Reference and lookup CSV input/output.
//!
//! Responsibilities:
//! - Read the vendor product/service-plan reference CSV.
//! - Render the SKU and service-plan lookup CSVs.
//! - Read the lookup CSVs back into catalogs.
//! - Carry hand-entered prices forward into a regenerated SKU lookup.
//!
//! Does NOT handle:
//! - Writing files; renderers return text and the CLI writes it atomically.
//!
//! Invariants:
//! - A leading UTF-8 byte order mark is ignored.
//! - Unknown columns are ignored; missing optional columns read as blank.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::catalog::{ServicePlanCatalog, ServicePlanRecord, SkuCatalog, SkuRecord};
use crate::error::{ReportError, Result};

/// One row of the vendor "product names and service plan identifiers" table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReferenceRow {
    #[serde(rename = "GUID", default)]
    pub guid: String,
    #[serde(rename = "String_Id", default)]
    pub string_id: String,
    #[serde(rename = "Product_Display_Name", default)]
    pub product_display_name: String,
    #[serde(rename = "Service_Plan_Id", default)]
    pub service_plan_id: String,
    #[serde(rename = "Service_Plan_Name", default)]
    pub service_plan_name: String,
    #[serde(rename = "Service_Plans_Included_Friendly_Names", default)]
    pub service_plan_friendly_name: String,
}

fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ReportError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

fn deserialize_rows<T, R>(reader: R, origin: &str) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.deserialize() {
        rows.push(record.map_err(|e| ReportError::csv(origin, e))?);
    }
    debug!(origin, rows = rows.len(), "Read CSV rows");
    Ok(rows)
}

/// Parse reference rows from CSV text.
pub fn parse_reference_csv(text: &str) -> Result<Vec<ReferenceRow>> {
    deserialize_rows(strip_bom(text).as_bytes(), "reference CSV")
}

/// Read the vendor reference CSV from disk.
pub fn read_reference_csv(path: &Path) -> Result<Vec<ReferenceRow>> {
    let text = read_input(path)?;
    deserialize_rows(strip_bom(&text).as_bytes(), &path.display().to_string())
}

/// Parse a SKU lookup CSV into a catalog.
pub fn parse_sku_lookup(text: &str) -> Result<SkuCatalog> {
    let rows: Vec<SkuRecord> = deserialize_rows(strip_bom(text).as_bytes(), "SKU lookup")?;
    Ok(SkuCatalog::from_records(rows))
}

/// Read the SKU lookup CSV from disk. A missing file is fatal.
pub fn read_sku_lookup(path: &Path) -> Result<SkuCatalog> {
    let text = read_input(path)?;
    let rows: Vec<SkuRecord> =
        deserialize_rows(strip_bom(&text).as_bytes(), &path.display().to_string())?;
    Ok(SkuCatalog::from_records(rows))
}

/// Parse a service-plan lookup CSV into a catalog.
pub fn parse_service_plan_lookup(text: &str) -> Result<ServicePlanCatalog> {
    let rows: Vec<ServicePlanRecord> =
        deserialize_rows(strip_bom(text).as_bytes(), "service plan lookup")?;
    Ok(ServicePlanCatalog::from_records(rows))
}

/// Read the service-plan lookup CSV from disk. A missing file is fatal.
pub fn read_service_plan_lookup(path: &Path) -> Result<ServicePlanCatalog> {
    let text = read_input(path)?;
    let rows: Vec<ServicePlanRecord> =
        deserialize_rows(strip_bom(&text).as_bytes(), &path.display().to_string())?;
    Ok(ServicePlanCatalog::from_records(rows))
}

fn render_rows<T: serde::Serialize>(rows: &[T], origin: &str) -> Result<String> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        for row in rows {
            writer
                .serialize(row)
                .map_err(|e| ReportError::csv(origin, e))?;
        }
        writer
            .flush()
            .map_err(|e| ReportError::csv(origin, e.into()))?;
    }
    Ok(String::from_utf8(buffer)?)
}

const SKU_LOOKUP_HEADER: &str = "SkuId,SkuPartNumber,DisplayName,Price,Currency\n";
const SERVICE_PLAN_LOOKUP_HEADER: &str = "ServicePlanId,ServicePlanName,ServicePlanDisplayName\n";

/// Render the SKU lookup CSV, header included even when empty.
pub fn render_sku_lookup(rows: &[SkuRecord]) -> Result<String> {
    if rows.is_empty() {
        return Ok(SKU_LOOKUP_HEADER.to_string());
    }
    render_rows(rows, "SKU lookup")
}

/// Render the service-plan lookup CSV, header included even when empty.
pub fn render_service_plan_lookup(rows: &[ServicePlanRecord]) -> Result<String> {
    if rows.is_empty() {
        return Ok(SERVICE_PLAN_LOOKUP_HEADER.to_string());
    }
    render_rows(rows, "service plan lookup")
}

/// Copy prices from a previous SKU lookup onto rows that have none.
///
/// Only SKUs present in `rows` are considered, so prices for SKUs the tenant
/// no longer subscribes to are dropped. Returns how many prices were kept.
pub fn carry_forward_prices(rows: &mut [SkuRecord], previous: &SkuCatalog) -> usize {
    let mut carried = 0;
    for row in rows.iter_mut() {
        if row.price_text().is_some() {
            continue;
        }
        let Some(old) = previous.get(&row.sku_id) else {
            continue;
        };
        if let Some(price) = old.price_text() {
            row.monthly_price = Some(price.to_string());
            row.currency = old.currency.clone();
            carried += 1;
        }
    }
    carried
}
