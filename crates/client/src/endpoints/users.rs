//! Licensed user listing.

use reqwest::Url;

use crate::error::{ClientError, Result};
use crate::models::USER_SELECT_FIELDS;

/// Filter selecting users that hold at least one license.
pub const LICENSED_USERS_FILTER: &str = "assignedLicenses/$count ne 0";

/// First-page URL for licensed users.
///
/// The `$filter` on a collection count is an advanced query, so callers must
/// also send `ConsistencyLevel: eventual` (see `odata::get_page`).
pub fn licensed_users_url(base_url: &str, page_size: u32) -> Result<String> {
    let mut url = Url::parse(&format!("{}/users", base_url))
        .map_err(|e| ClientError::InvalidUrl(format!("{base_url}/users: {e}")))?;

    url.query_pairs_mut()
        .append_pair("$filter", LICENSED_USERS_FILTER)
        .append_pair("$count", "true")
        .append_pair("$select", &USER_SELECT_FIELDS.join(","))
        .append_pair("$top", &page_size.to_string());

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_licensed_users_url() {
        let url = licensed_users_url("https://graph.microsoft.com/v1.0", 999).unwrap();
        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.path(), "/v1.0/users");

        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("$filter".to_string(), LICENSED_USERS_FILTER.to_string())));
        assert!(pairs.contains(&("$count".to_string(), "true".to_string())));
        assert!(pairs.contains(&("$top".to_string(), "999".to_string())));

        let select = pairs
            .iter()
            .find(|(k, _)| k == "$select")
            .map(|(_, v)| v.clone())
            .unwrap();
        assert!(select.contains("signInActivity"));
        assert!(select.contains("licenseAssignmentStates"));
    }

    #[test]
    fn test_licensed_users_url_rejects_bad_base() {
        assert!(matches!(
            licensed_users_url("not a url", 10),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
