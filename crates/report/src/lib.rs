//! License report business logic.
//!
//! Joins Graph license data against the SKU and service-plan lookup tables
//! and turns it into per-user rows, aggregate tables and rendered output.
//!
//! Responsibilities:
//! - Build lookup tables from the vendor reference CSV and the tenant's SKUs.
//! - Read and write the lookup CSVs.
//! - Compute costs, duplicate assignments and inactivity per user.
//! - Aggregate rows by department, country and SKU.
//! - Render CSV, HTML and JSON summaries.
//!
//! Does NOT handle:
//! - HTTP calls or authentication (see `graph-client`).
//! - Writing files to disk (see the CLI).
//!
//! Invariants:
//! - Every function here except group name resolution is a pure transform.
//! - Money is carried as integer cents and exposed as two-decimal `Decimal`.

pub mod catalog;
pub mod cost;
pub mod duplicates;
pub mod error;
pub mod inactivity;
pub mod lookup;
pub mod reference;
pub mod render;
pub mod report;

pub use catalog::{ServicePlanCatalog, ServicePlanRecord, SkuCatalog, SkuRecord};
pub use cost::{PriceLookup, compute_annual_cost, compute_monthly_cost};
pub use duplicates::{duplicate_warning, find_duplicate_skus};
pub use error::{ReportError, Result};
pub use inactivity::{DaysSinceSignIn, Inactivity, InactivityStatus, classify_inactivity};
pub use lookup::{LookupBuildStats, ReferenceLookups, build_reference_lookups};
pub use reference::ReferenceRow;
pub use report::{
    AssignmentMethod, GroupNameResolver, GroupedUsage, LicenseAssignment, LicenseReport,
    ReportBuilder, SkuUsageSummary, TenantSummary, UserLicenseReportRow,
};
