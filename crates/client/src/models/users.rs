//! User models (`GET /users` with license and sign-in properties).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::{blank_as_none, null_as_default};

/// Properties requested via `$select` when listing licensed users.
pub const USER_SELECT_FIELDS: &[&str] = &[
    "id",
    "displayName",
    "userPrincipalName",
    "accountEnabled",
    "department",
    "jobTitle",
    "companyName",
    "country",
    "usageLocation",
    "assignedLicenses",
    "licenseAssignmentStates",
    "signInActivity",
];

/// A directory user with license assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub user_principal_name: String,
    #[serde(default)]
    pub account_enabled: Option<bool>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub usage_location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assigned_licenses: Vec<AssignedLicense>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub license_assignment_states: Vec<LicenseAssignmentState>,
    /// Absent when the tenant lacks the sign-in log entitlement or permission.
    #[serde(default)]
    pub sign_in_activity: Option<SignInActivity>,
}

impl User {
    /// Display name, falling back to the UPN.
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or(&self.user_principal_name)
    }
}

/// A license on the user, regardless of how it was assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedLicense {
    pub sku_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disabled_plans: Vec<String>,
}

/// Per-assignment license state, one entry per (sku, source) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseAssignmentState {
    pub sku_id: String,
    /// Group id for group-based assignments; `None` for direct assignments.
    #[serde(default)]
    pub assigned_by_group: Option<String>,
    #[serde(default)]
    pub state: AssignmentState,
    /// Graph error code, `"None"` when healthy.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub last_updated_date_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disabled_plans: Vec<String>,
}

impl LicenseAssignmentState {
    /// Whether the assignment came from group membership.
    pub fn is_group_based(&self) -> bool {
        self.assigned_by_group.is_some()
    }

    /// Error code when present and not `"None"`.
    pub fn error_code(&self) -> Option<&str> {
        self.error
            .as_deref()
            .filter(|e| !e.is_empty() && !e.eq_ignore_ascii_case("none"))
    }
}

/// Processing state of a license assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentState {
    #[default]
    Active,
    ActiveWithError,
    Disabled,
    Error,
    #[serde(other)]
    Unknown,
}

/// Sign-in timestamps (requires `AuditLog.Read.All` and a premium tenant).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInActivity {
    #[serde(default)]
    pub last_sign_in_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_non_interactive_sign_in_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_successful_sign_in_date_time: Option<DateTime<Utc>>,
}
