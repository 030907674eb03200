//! Licensed user listing.

use crate::client::GraphClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::{ODataPage, User};
use crate::retry_call;
use license_config::constants::MAX_PAGES;

const USERS_ENDPOINT: &str = "/users";

impl GraphClient {
    /// List every user holding at least one license.
    pub async fn list_licensed_users(&mut self) -> Result<Vec<User>> {
        self.list_licensed_users_with_progress(|_, _| {}).await
    }

    /// List licensed users, reporting progress after each page.
    ///
    /// `on_page` receives the number of users fetched so far and the total
    /// reported by `@odata.count`, when Graph returned one. Each page is
    /// fetched under its own token check, so a token that expires midway
    /// through a large tenant is renewed without restarting the listing.
    pub async fn list_licensed_users_with_progress<F>(&mut self, mut on_page: F) -> Result<Vec<User>>
    where
        F: FnMut(usize, Option<u64>),
    {
        let mut users: Vec<User> = Vec::new();
        let mut next = Some(endpoints::licensed_users_url(&self.base_url, self.page_size)?);
        let mut total = None;
        let mut pages = 0usize;

        while let Some(url) = next.take() {
            pages += 1;
            if pages > MAX_PAGES {
                return Err(ClientError::PageLimitExceeded(MAX_PAGES));
            }

            let page: ODataPage<User> = retry_call!(
                self,
                __token,
                endpoints::get_page(
                    &self.http,
                    &url,
                    &__token,
                    USERS_ENDPOINT,
                    true,
                    self.max_retries,
                    self.metrics.as_ref(),
                )
                .await
            )?;

            if page.count.is_some() {
                total = page.count;
            }
            users.extend(page.value);
            on_page(users.len(), total);
            next = page.next_link;
        }

        tracing::debug!(count = users.len(), pages, "Listed licensed users");
        Ok(users)
    }
}
