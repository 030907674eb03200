//! Client builder for constructing [`GraphClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (base_url, auth_strategy)
//! - Normalizing the Graph and authority URLs (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeouts, TLS verification)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`GraphClient`] methods in the sibling modules)
//! - Token lifecycle (handled by [`TokenManager`] in `auth.rs`)
//! - Retry logic for failed requests (handled by the `retry_call!` macro)
//!
//! # Invariants
//! - `base_url` and `auth_strategy` must be provided before calling `build()`
//! - URLs are always normalized to have no trailing slashes
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::time::Duration;

use moka::future::Cache;

use crate::auth::{AuthStrategy, TokenManager};
use crate::client::GraphClient;
use crate::endpoints::default_scope_for;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use license_config::{
    AuthStrategy as ConfigAuthStrategy, Config,
    constants::{
        DEFAULT_AUTHORITY_URL, DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_GROUP_CACHE_CAPACITY,
        DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS,
    },
};

/// Builder for creating a new [`GraphClient`].
///
/// Everything has a default except `base_url` and `auth_strategy`.
pub struct GraphClientBuilder {
    base_url: Option<String>,
    authority_url: String,
    scope: Option<String>,
    auth_strategy: Option<AuthStrategy>,
    skip_verify: bool,
    timeout: Duration,
    max_retries: usize,
    token_expiry_buffer_seconds: u64,
    page_size: u32,
    group_cache_capacity: u64,
    metrics: Option<MetricsCollector>,
}

impl Default for GraphClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            authority_url: DEFAULT_AUTHORITY_URL.to_string(),
            scope: None,
            auth_strategy: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            token_expiry_buffer_seconds: DEFAULT_EXPIRY_BUFFER_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            group_cache_capacity: DEFAULT_GROUP_CACHE_CAPACITY,
            metrics: None,
        }
    }
}

impl GraphClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Graph API root, e.g. `https://graph.microsoft.com/v1.0`.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the token authority root, e.g. `https://login.microsoftonline.com`.
    pub fn authority_url(mut self, url: String) -> Self {
        self.authority_url = url;
        self
    }

    /// Override the OAuth2 scope. Defaults to `<graph origin>/.default`.
    pub fn scope(mut self, scope: String) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Set the authentication strategy.
    pub fn auth_strategy(mut self, strategy: AuthStrategy) -> Self {
        self.auth_strategy = Some(strategy);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Disabling TLS verification makes the connection vulnerable to
    /// man-in-the-middle attacks. Only affects HTTPS URLs.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries for throttled requests.
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Refresh tokens this many seconds before they expire.
    pub fn token_expiry_buffer_seconds(mut self, buffer: u64) -> Self {
        self.token_expiry_buffer_seconds = buffer;
        self
    }

    /// Set `$top` for paged collections.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Maximum number of group names kept in memory.
    pub fn group_cache_capacity(mut self, capacity: u64) -> Self {
        self.group_cache_capacity = capacity;
        self
    }

    /// Set the metrics collector for request tracking.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Create a client builder from configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        let auth_strategy = match &config.auth.strategy {
            ConfigAuthStrategy::ClientCredentials {
                tenant_id,
                client_id,
                client_secret,
            } => AuthStrategy::ClientCredentials {
                tenant_id: tenant_id.clone(),
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            },
            ConfigAuthStrategy::AccessToken { token } => AuthStrategy::AccessToken {
                token: token.clone(),
            },
        };

        self.base_url = Some(config.connection.base_url.clone());
        self.authority_url = config.connection.authority_url.clone();
        self.auth_strategy = Some(auth_strategy);
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self.max_retries = config.connection.max_retries;
        self.token_expiry_buffer_seconds = config.connection.token_expiry_buffer_seconds;
        self.page_size = config.connection.page_size;
        self
    }

    fn normalize_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`GraphClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` was not provided.
    /// Returns [`ClientError::AuthFailed`] if `auth_strategy` was not provided.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<GraphClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_url(base_url);
        let authority_url = Self::normalize_url(self.authority_url);

        let auth_strategy = self
            .auth_strategy
            .ok_or_else(|| ClientError::AuthFailed("auth_strategy is required".to_string()))?;

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;
        let scope = self
            .scope
            .unwrap_or_else(|| default_scope_for(&base_url));
        let token_manager =
            TokenManager::new(auth_strategy).with_expiry_buffer(self.token_expiry_buffer_seconds);

        Ok(GraphClient {
            http,
            base_url,
            authority_url,
            scope,
            token_manager,
            max_retries: self.max_retries,
            page_size: self.page_size,
            metrics: self.metrics,
            group_cache: Cache::new(self.group_cache_capacity),
        })
    }
}
