//! Microsoft Graph client and API methods.
//!
//! This module provides [`GraphClient`], which owns the HTTP client and the
//! bearer token lifecycle for the license report.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `session`: Token acquisition helpers (private module)
//! - `skus`: Subscribed SKU listing
//! - `users`: Licensed user listing with paging
//! - `groups`: Group display name lookups with an in-memory cache
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Token storage and expiry tracking (delegated to [`crate::auth::TokenManager`])
//! - Report semantics (see the `license-report` crate)
//!
//! # Invariants
//! - Every API call that receives a 401 with client-credentials auth drops the
//!   token, acquires a new one, and retries once. Static tokens are never retried.
//! - The `retry_call!` macro centralizes this retry pattern across all API methods.

pub mod builder;
mod groups;
mod session;
mod skus;
mod users;

use moka::future::Cache;

use crate::auth::TokenManager;
use crate::metrics::MetricsCollector;

/// Wrap an async API call with token re-acquisition on 401.
///
/// When a 401 is received and the client acquires its own tokens, the held
/// token is dropped, a new one is requested, and the call is retried once.
///
/// ```ignore
/// retry_call!(self, __token, endpoints::get_group(&self.http, &self.base_url, &__token, id, self.max_retries, self.metrics.as_ref()).await)
/// ```
///
/// The placeholder `__token` is bound to the current bearer token.
#[macro_export]
macro_rules! retry_call {
    ($self:expr, $token:ident, $call:expr) => {{
        let $token = $self.get_auth_token().await?;
        let result = $call;

        match result {
            Ok(data) => Ok(data),
            Err($crate::error::ClientError::ApiError { status: 401, .. })
                if !$self.is_static_token_auth() =>
            {
                ::tracing::debug!("Access token rejected (status 401), acquiring a new one");
                $self.token_manager.clear_token();
                let $token = $self.get_auth_token().await?;
                $call
            }
            Err(e) => Err(e),
        }
    }};
}

/// Microsoft Graph client.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use graph_client::{AuthStrategy, GraphClient};
/// use secrecy::SecretString;
///
/// let client = GraphClient::builder()
///     .base_url("https://graph.microsoft.com/v1.0".to_string())
///     .auth_strategy(AuthStrategy::AccessToken {
///         token: SecretString::new("eyJ0...".to_string().into()),
///     })
///     .build()?;
/// ```
#[derive(Debug)]
pub struct GraphClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) authority_url: String,
    pub(crate) scope: String,
    pub(crate) token_manager: TokenManager,
    pub(crate) max_retries: usize,
    pub(crate) page_size: u32,
    pub(crate) metrics: Option<MetricsCollector>,
    pub(crate) group_cache: Cache<String, String>,
}

impl GraphClient {
    /// Create a new client builder.
    pub fn builder() -> builder::GraphClientBuilder {
        builder::GraphClientBuilder::new()
    }

    /// Get the Graph API root.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the token authority root.
    pub fn authority_url(&self) -> &str {
        &self.authority_url
    }

    /// OAuth2 scope requested for client-credentials tokens.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// `$top` used when paging collections.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}
