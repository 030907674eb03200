//! Microsoft Graph client for license reporting.
//!
//! This crate provides a typed client for the Graph resources a license
//! report needs: subscribed SKUs, licensed users with sign-in activity, and
//! group names. It supports app-only client-credentials authentication with
//! automatic token renewal, or a pre-acquired bearer token.

mod auth;
pub mod client;
pub mod error;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
mod serde_helpers;
pub mod tracing;

pub mod endpoints;

pub use auth::{AuthStrategy, TokenManager};
pub use client::GraphClient;
pub use client::builder::GraphClientBuilder;
pub use error::{ClientError, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use metrics_exporter::MetricsExporter;
pub use self::tracing::{TracingConfig, TracingGuard};
pub use models::{
    AssignedLicense, AssignmentState, Group, LicenseAssignmentState, ODataPage, PrepaidUnits,
    ServicePlanInfo, SignInActivity, SubscribedSku, User,
};
