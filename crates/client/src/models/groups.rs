//! Group models (`GET /groups/{id}`).

use serde::{Deserialize, Serialize};

use crate::serde_helpers::blank_as_none;

/// The subset of a group needed to label group-based license assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub display_name: Option<String>,
}
