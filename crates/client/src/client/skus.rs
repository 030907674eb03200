//! Subscribed SKU listing.

use crate::client::GraphClient;
use crate::endpoints::{self, SUBSCRIBED_SKUS_PATH};
use crate::error::{ClientError, Result};
use crate::models::{ODataPage, SubscribedSku};
use crate::retry_call;
use license_config::constants::MAX_PAGES;

impl GraphClient {
    /// List every product the tenant has purchased.
    ///
    /// Follows `@odata.nextLink` when Graph pages the collection.
    pub async fn list_subscribed_skus(&mut self) -> Result<Vec<SubscribedSku>> {
        let mut skus = Vec::new();
        let mut next = Some(format!("{}{}", self.base_url, SUBSCRIBED_SKUS_PATH));
        let mut pages = 0usize;

        while let Some(url) = next.take() {
            pages += 1;
            if pages > MAX_PAGES {
                return Err(ClientError::PageLimitExceeded(MAX_PAGES));
            }

            let page: ODataPage<SubscribedSku> = retry_call!(
                self,
                __token,
                endpoints::get_page(
                    &self.http,
                    &url,
                    &__token,
                    SUBSCRIBED_SKUS_PATH,
                    false,
                    self.max_retries,
                    self.metrics.as_ref(),
                )
                .await
            )?;

            skus.extend(page.value);
            next = page.next_link;
        }

        tracing::debug!(count = skus.len(), pages, "Listed subscribed SKUs");
        Ok(skus)
    }
}
