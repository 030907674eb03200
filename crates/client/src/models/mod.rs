//! Data models for Microsoft Graph responses.
//!
//! Types are organized by resource in submodules and re-exported here.

pub mod groups;
pub mod odata;
pub mod skus;
pub mod token;
pub mod users;

pub use groups::Group;
pub use odata::{GraphErrorResponse, ODataPage};
pub use skus::{PrepaidUnits, ServicePlanInfo, SubscribedSku};
pub use token::{TokenErrorResponse, TokenResponse};
pub use users::{
    AssignedLicense, AssignmentState, LicenseAssignmentState, SignInActivity, USER_SELECT_FIELDS,
    User,
};
