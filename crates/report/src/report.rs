//! Per-user report rows and aggregate tables.
//!
//! Responsibilities:
//! - Derive license assignments from Graph user payloads.
//! - Resolve group names through a [`GroupNameResolver`].
//! - Build one [`UserLicenseReportRow`] per user in display-name order.
//! - Aggregate rows by department and country, and SKUs by usage.
//!
//! Does NOT handle:
//! - Fetching users or SKUs (see `graph-client`).
//! - Rendering (see `render`).
//!
//! Invariants:
//! - Rows are never mutated after creation.
//! - Aggregates are computed only after every row exists.
//! - A failed group lookup never fails the report; the id is shown instead.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use graph_client::{AssignmentState, ClientError, GraphClient, SubscribedSku, User};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::{ServicePlanCatalog, SkuCatalog};
use crate::cost::{PriceLookup, cents_to_decimal, monthly_breakdown, parse_price_cents};
use crate::duplicates::{NO_DUPLICATES, duplicate_warning, find_duplicate_skus};
use crate::error::{ReportError, Result};
use crate::inactivity::{DaysSinceSignIn, Inactivity, InactivityStatus, classify_inactivity};

/// Bucket for users with a blank department or country.
pub const UNSPECIFIED: &str = "Unspecified";

/// Resolves group ids to display names.
#[async_trait]
pub trait GroupNameResolver: Send {
    type Error: fmt::Display + Send;

    async fn group_name(&mut self, group_id: &str) -> std::result::Result<String, Self::Error>;
}

#[async_trait]
impl GroupNameResolver for GraphClient {
    type Error = ClientError;

    async fn group_name(&mut self, group_id: &str) -> std::result::Result<String, ClientError> {
        self.group_display_name(group_id).await
    }
}

/// How a license reached the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignmentMethod {
    Direct,
    Group,
}

/// One license assignment on one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseAssignment {
    pub sku_id: String,
    pub method: AssignmentMethod,
    pub group_id: Option<String>,
    pub state: AssignmentState,
    /// Graph error code, e.g. `CountViolation`.
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub disabled_plans: Vec<String>,
}

impl LicenseAssignment {
    /// Whether the license is applied to the user.
    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            AssignmentState::Active | AssignmentState::ActiveWithError
        )
    }

    pub fn is_error(&self) -> bool {
        self.state != AssignmentState::Active || self.error.is_some()
    }
}

/// Assignments for a user.
///
/// Uses `licenseAssignmentStates` when Graph returned it, otherwise treats
/// every `assignedLicenses` entry as an active direct assignment.
pub fn derive_assignments(user: &User) -> Vec<LicenseAssignment> {
    if user.license_assignment_states.is_empty() {
        return user
            .assigned_licenses
            .iter()
            .map(|l| LicenseAssignment {
                sku_id: l.sku_id.clone(),
                method: AssignmentMethod::Direct,
                group_id: None,
                state: AssignmentState::Active,
                error: None,
                last_updated: None,
                disabled_plans: l.disabled_plans.clone(),
            })
            .collect();
    }

    user.license_assignment_states
        .iter()
        .map(|s| LicenseAssignment {
            sku_id: s.sku_id.clone(),
            method: if s.is_group_based() {
                AssignmentMethod::Group
            } else {
                AssignmentMethod::Direct
            },
            group_id: s.assigned_by_group.clone().filter(|g| !g.trim().is_empty()),
            state: s.state,
            error: s.error_code().map(str::to_string),
            last_updated: s.last_updated_date_time,
            disabled_plans: s.disabled_plans.clone(),
        })
        .collect()
}

/// One licensed user in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserLicenseReportRow {
    pub display_name: String,
    pub user_principal_name: String,
    pub account_enabled: Option<bool>,
    pub department: Option<String>,
    pub country: Option<String>,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub direct_licenses: Vec<String>,
    /// `"<sku> (via <group>)"` entries.
    pub group_licenses: Vec<String>,
    pub disabled_plans: Vec<String>,
    /// Duplicated SKU names joined with `", "`, or `"N/A"`.
    pub duplicate_warning: String,
    pub license_errors: Vec<String>,
    pub last_sign_in: Option<DateTime<Utc>>,
    pub days_since_sign_in: DaysSinceSignIn,
    pub inactivity: InactivityStatus,
    pub monthly_cost: Option<Decimal>,
    pub annual_cost: Option<Decimal>,
    /// Unique SKU ids held, used for aggregates.
    #[serde(skip)]
    pub sku_ids: Vec<String>,
}

impl UserLicenseReportRow {
    pub fn has_duplicates(&self) -> bool {
        self.duplicate_warning != NO_DUPLICATES
    }

    pub fn error_count(&self) -> usize {
        self.license_errors.len()
    }
}

/// Department or country breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedUsage {
    pub key: String,
    pub users: usize,
    pub licenses: usize,
    pub annual_cost: Option<Decimal>,
}

/// Purchased versus consumed units for one subscribed SKU.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkuUsageSummary {
    pub sku_id: String,
    pub display_name: String,
    pub units_consumed: u64,
    pub units_purchased: u64,
    /// Negative when more units are consumed than purchased.
    pub units_available: i64,
    pub monthly_price: Option<Decimal>,
    /// Annual cost of every purchased unit.
    pub total_annual_cost: Option<Decimal>,
    /// Annual cost of consumed units.
    pub assigned_annual_cost: Option<Decimal>,
}

/// Tenant-wide counters shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenantSummary {
    pub total_users: usize,
    pub total_assignments: usize,
    pub license_errors: usize,
    pub users_with_duplicates: usize,
    pub inactive_users: usize,
    pub never_signed_in: usize,
    pub sign_in_unknown: usize,
    pub total_purchased_annual_cost: Option<Decimal>,
    pub total_assigned_annual_cost: Option<Decimal>,
    /// Assigned over purchased cost, in percent. `None` when nothing priced was purchased.
    pub utilization_percent: Option<Decimal>,
}

/// A complete report ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct LicenseReport {
    pub generated_at: DateTime<Utc>,
    pub pricing_enabled: bool,
    pub currency: Option<String>,
    pub rows: Vec<UserLicenseReportRow>,
    pub sku_usage: Vec<SkuUsageSummary>,
    pub departments: Vec<GroupedUsage>,
    pub countries: Vec<GroupedUsage>,
    pub summary: TenantSummary,
}

/// Builds a [`LicenseReport`] from Graph data and the lookup catalogs.
pub struct ReportBuilder<'a> {
    skus: &'a SkuCatalog,
    service_plans: &'a ServicePlanCatalog,
    as_of: DateTime<Utc>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(skus: &'a SkuCatalog, service_plans: &'a ServicePlanCatalog) -> Self {
        Self {
            skus,
            service_plans,
            as_of: Utc::now(),
        }
    }

    /// Reference time for inactivity windows.
    pub fn as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = as_of;
        self
    }

    /// Build the report.
    ///
    /// Users are sorted by display name, case-insensitively and stably.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NoLicensedUsers`] when `users` is empty.
    pub async fn build<R: GroupNameResolver>(
        &self,
        mut users: Vec<User>,
        subscribed: &[SubscribedSku],
        resolver: &mut R,
    ) -> Result<LicenseReport> {
        if users.is_empty() {
            return Err(ReportError::NoLicensedUsers);
        }
        users.sort_by_cached_key(|u| u.name().to_lowercase());

        let mut unpriced: BTreeSet<String> = BTreeSet::new();
        let mut failed_groups: HashSet<String> = HashSet::new();
        let mut rows = Vec::with_capacity(users.len());
        for user in &users {
            rows.push(
                self.build_row(user, resolver, &mut unpriced, &mut failed_groups)
                    .await,
            );
        }
        if self.skus.pricing_enabled() {
            for sku_id in &unpriced {
                warn!(
                    sku = self.skus.display_name(sku_id),
                    "SKU has no usable price; counted as zero cost"
                );
            }
        }

        let pricing = self.skus.pricing_enabled();
        let sku_usage = self.sku_usage(subscribed);
        let departments = group_usage(&rows, |r| r.department.as_deref(), pricing);
        let countries = group_usage(&rows, |r| r.country.as_deref(), pricing);
        let summary = summarize(&rows, &sku_usage, pricing);

        info!(
            users = summary.total_users,
            assignments = summary.total_assignments,
            errors = summary.license_errors,
            duplicates = summary.users_with_duplicates,
            inactive = summary.inactive_users,
            "Built license report"
        );

        Ok(LicenseReport {
            generated_at: self.as_of,
            pricing_enabled: pricing,
            currency: self.skus.currency().map(str::to_string),
            rows,
            sku_usage,
            departments,
            countries,
            summary,
        })
    }

    async fn build_row<R: GroupNameResolver>(
        &self,
        user: &User,
        resolver: &mut R,
        unpriced: &mut BTreeSet<String>,
        failed_groups: &mut HashSet<String>,
    ) -> UserLicenseReportRow {
        let assignments = derive_assignments(user);

        let mut direct_ids: Vec<&str> = Vec::new();
        let mut group_ids: Vec<&str> = Vec::new();
        let mut direct_licenses: Vec<String> = Vec::new();
        let mut group_licenses: Vec<String> = Vec::new();
        let mut license_errors: Vec<String> = Vec::new();

        for assignment in &assignments {
            let sku_name = self.skus.display_name(&assignment.sku_id);

            if assignment.is_error() {
                let detail = assignment
                    .error
                    .clone()
                    .unwrap_or_else(|| format!("{:?}", assignment.state));
                debug!(user = %user.user_principal_name, sku = sku_name, detail = %detail, "License assignment error");
                license_errors.push(format!("{sku_name}: {detail}"));
            }

            if !assignment.is_active() {
                continue;
            }

            match assignment.method {
                AssignmentMethod::Direct => {
                    direct_ids.push(&assignment.sku_id);
                    push_unique(&mut direct_licenses, sku_name.to_string());
                }
                AssignmentMethod::Group => {
                    group_ids.push(&assignment.sku_id);
                    let group = match &assignment.group_id {
                        Some(group_id) => {
                            self.resolve_group(resolver, group_id, failed_groups).await
                        }
                        None => "unknown group".to_string(),
                    };
                    push_unique(&mut group_licenses, format!("{sku_name} (via {group})"));
                }
            }
        }

        let duplicates = find_duplicate_skus(&direct_ids, &group_ids);
        let duplicate_warning = duplicate_warning(&duplicates, self.skus);

        let sku_ids = unique_sku_ids(user, &assignments);

        let mut disabled_plans: Vec<String> = Vec::new();
        let disabled_ids = user
            .assigned_licenses
            .iter()
            .flat_map(|l| &l.disabled_plans)
            .chain(assignments.iter().flat_map(|a| &a.disabled_plans));
        for plan_id in disabled_ids {
            push_unique(
                &mut disabled_plans,
                self.service_plans.display_name(plan_id).to_string(),
            );
        }

        let inactivity = match &user.sign_in_activity {
            Some(activity) => classify_inactivity(
                activity.last_sign_in_date_time,
                activity.last_non_interactive_sign_in_date_time,
                self.as_of,
            ),
            None => Inactivity::unknown(),
        };

        let (monthly_cost, annual_cost) = if self.skus.pricing_enabled() {
            let breakdown = monthly_breakdown(&sku_ids, self.skus);
            for entry in &breakdown.unpriced {
                unpriced.insert(entry.sku_id().to_string());
            }
            (Some(breakdown.monthly()), Some(breakdown.annual()))
        } else {
            (None, None)
        };

        UserLicenseReportRow {
            display_name: user.name().to_string(),
            user_principal_name: user.user_principal_name.clone(),
            account_enabled: user.account_enabled,
            department: user.department.clone(),
            country: user.country.clone(),
            job_title: user.job_title.clone(),
            company_name: user.company_name.clone(),
            direct_licenses,
            group_licenses,
            disabled_plans,
            duplicate_warning,
            license_errors,
            last_sign_in: inactivity.last_sign_in,
            days_since_sign_in: inactivity.days,
            inactivity: inactivity.status,
            monthly_cost,
            annual_cost,
            sku_ids,
        }
    }

    /// Group display name, or the id when the lookup fails.
    ///
    /// Failed ids are remembered for the rest of the run and not looked up again.
    async fn resolve_group<R: GroupNameResolver>(
        &self,
        resolver: &mut R,
        group_id: &str,
        failed_groups: &mut HashSet<String>,
    ) -> String {
        if failed_groups.contains(group_id) {
            return group_id.to_string();
        }
        match resolver.group_name(group_id).await {
            Ok(name) => name,
            Err(e) => {
                warn!(group_id, error = %e, "Group name lookup failed; showing the group id");
                failed_groups.insert(group_id.to_string());
                group_id.to_string()
            }
        }
    }

    fn sku_usage(&self, subscribed: &[SubscribedSku]) -> Vec<SkuUsageSummary> {
        let pricing = self.skus.pricing_enabled();
        subscribed
            .iter()
            .map(|sku| {
                let display_name = match self.skus.get(&sku.sku_id) {
                    Some(_) => self.skus.display_name(&sku.sku_id).to_string(),
                    None if !sku.sku_part_number.is_empty() => sku.sku_part_number.clone(),
                    None => sku.sku_id.clone(),
                };
                let purchased = sku.prepaid_units.enabled;
                let consumed = sku.consumed_units;
                let price_cents = if pricing {
                    self.skus
                        .monthly_price(&sku.sku_id)
                        .and_then(parse_price_cents)
                } else {
                    None
                };
                let annual = |units: u64| price_cents.and_then(|c| annual_cost_of_units(c, units));

                SkuUsageSummary {
                    sku_id: sku.sku_id.clone(),
                    display_name,
                    units_consumed: consumed,
                    units_purchased: purchased,
                    units_available: i64::try_from(purchased)
                        .unwrap_or(i64::MAX)
                        .saturating_sub(i64::try_from(consumed).unwrap_or(i64::MAX)),
                    monthly_price: price_cents.map(cents_to_decimal),
                    total_annual_cost: annual(purchased),
                    assigned_annual_cost: annual(consumed),
                }
            })
            .collect()
    }
}

/// Annual cost of `units` at a monthly unit price, or `None` past `Decimal`'s range.
fn annual_cost_of_units(monthly_cents: i64, units: u64) -> Option<Decimal> {
    let cents = i128::from(monthly_cents)
        .checked_mul(12)?
        .checked_mul(i128::from(units))?;
    Decimal::try_from_i128_with_scale(cents, 2).ok()
}

/// Sum of costs, or `None` when the total leaves `Decimal`'s range.
fn checked_total(costs: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    let total = costs
        .into_iter()
        .try_fold(Decimal::ZERO, |total, cost| total.checked_add(cost));
    if total.is_none() {
        warn!("Cost total exceeds the representable range; reporting it as N/A");
    }
    total
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

/// Unique SKU ids the user holds, for costing and counting.
fn unique_sku_ids(user: &User, assignments: &[LicenseAssignment]) -> Vec<String> {
    let mut seen = HashSet::new();
    let source: Vec<&str> = if user.assigned_licenses.is_empty() {
        assignments
            .iter()
            .filter(|a| a.is_active())
            .map(|a| a.sku_id.as_str())
            .collect()
    } else {
        user.assigned_licenses
            .iter()
            .map(|l| l.sku_id.as_str())
            .collect()
    };
    source
        .into_iter()
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

fn bucket_key(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => UNSPECIFIED.to_string(),
    }
}

/// Group rows by a key, largest groups first.
fn group_usage<F>(rows: &[UserLicenseReportRow], key: F, pricing: bool) -> Vec<GroupedUsage>
where
    F: Fn(&UserLicenseReportRow) -> Option<&str>,
{
    let mut groups: BTreeMap<String, GroupedUsage> = BTreeMap::new();
    for row in rows {
        let k = bucket_key(key(row));
        let entry = groups.entry(k.clone()).or_insert_with(|| GroupedUsage {
            key: k,
            users: 0,
            licenses: 0,
            annual_cost: pricing.then_some(Decimal::ZERO),
        });
        entry.users += 1;
        entry.licenses += row.sku_ids.len();
        if let (Some(total), Some(cost)) = (entry.annual_cost, row.annual_cost) {
            entry.annual_cost = checked_total([total, cost]);
        }
    }

    let mut usage: Vec<GroupedUsage> = groups.into_values().collect();
    usage.sort_by(|a, b| b.users.cmp(&a.users));
    usage
}

fn summarize(
    rows: &[UserLicenseReportRow],
    sku_usage: &[SkuUsageSummary],
    pricing: bool,
) -> TenantSummary {
    let (purchased, assigned) = if pricing {
        (
            checked_total(sku_usage.iter().filter_map(|s| s.total_annual_cost)),
            checked_total(sku_usage.iter().filter_map(|s| s.assigned_annual_cost)),
        )
    } else {
        (None, None)
    };

    let utilization_percent = match (purchased, assigned) {
        (Some(p), Some(a)) if !p.is_zero() => a
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.checked_div(p))
            .map(|percent| percent.round_dp(1)),
        _ => None,
    };

    TenantSummary {
        total_users: rows.len(),
        total_assignments: rows.iter().map(|r| r.sku_ids.len()).sum(),
        license_errors: rows.iter().map(UserLicenseReportRow::error_count).sum(),
        users_with_duplicates: rows.iter().filter(|r| r.has_duplicates()).count(),
        inactive_users: rows.iter().filter(|r| r.inactivity.is_inactive()).count(),
        never_signed_in: rows
            .iter()
            .filter(|r| r.inactivity == InactivityStatus::Never)
            .count(),
        sign_in_unknown: rows
            .iter()
            .filter(|r| r.inactivity == InactivityStatus::Unknown)
            .count(),
        total_purchased_annual_cost: purchased,
        total_assigned_annual_cost: assigned,
        utilization_percent,
    }
}
