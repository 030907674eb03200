//! Group display name lookups.

use crate::client::GraphClient;
use crate::endpoints;
use crate::error::Result;
use crate::retry_call;

impl GraphClient {
    /// Display name for a group id, cached for the lifetime of the client.
    ///
    /// A group without a display name resolves to its id.
    pub async fn group_display_name(&mut self, group_id: &str) -> Result<String> {
        if let Some(name) = self.group_cache.get(group_id).await {
            if let Some(m) = &self.metrics {
                m.record_cache_hit();
            }
            return Ok(name);
        }
        if let Some(m) = &self.metrics {
            m.record_cache_miss();
        }

        let group = retry_call!(
            self,
            __token,
            endpoints::get_group(
                &self.http,
                &self.base_url,
                &__token,
                group_id,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )?;

        let name = group.display_name.unwrap_or_else(|| group_id.to_string());
        self.group_cache
            .insert(group_id.to_string(), name.clone())
            .await;
        Ok(name)
    }

    /// Number of group names currently cached.
    pub fn cached_group_count(&self) -> u64 {
        self.group_cache.entry_count()
    }
}
