//! Group lookup.

use reqwest::Client;

use crate::endpoints::encode_path_segment;
use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::Group;

/// Get a group's id and display name.
pub async fn get_group(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    group_id: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<Group> {
    let url = format!("{}/groups/{}", base_url, encode_path_segment(group_id));

    let builder = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", auth_token))
        .query(&[("$select", "id,displayName")]);

    let response =
        send_request_with_retry(builder, max_retries, "/groups/{id}", "GET", metrics).await?;

    response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse group: {e}")))
}
