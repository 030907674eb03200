//! Generic single-page fetch for OData collections.

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::ODataPage;

/// Fetch one page of a collection from an absolute URL.
///
/// `url` is either the first-page URL built by the caller or a previous
/// page's `@odata.nextLink`, which already carries every query option.
/// `advanced_query` adds `ConsistencyLevel: eventual`, which Graph requires
/// for `$count` and filters on `assignedLicenses/$count`.
#[allow(clippy::too_many_arguments)]
pub async fn get_page<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    auth_token: &str,
    endpoint: &str,
    advanced_query: bool,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<ODataPage<T>> {
    let mut builder = client
        .get(url)
        .header("Authorization", format!("Bearer {}", auth_token));
    if advanced_query {
        builder = builder.header("ConsistencyLevel", "eventual");
    }

    let response = send_request_with_retry(builder, max_retries, endpoint, "GET", metrics).await?;

    let page: ODataPage<T> = response.json().await.map_err(|e| {
        ClientError::InvalidResponse(format!("Failed to parse {endpoint} page: {e}"))
    })?;

    if let Some(m) = metrics {
        m.record_page(endpoint);
    }

    Ok(page)
}
