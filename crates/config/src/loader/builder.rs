//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Support loading from environment variables, profile files, and direct builder methods.
//! - Build and validate the final `Config` from loaded values.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Profile file loading logic (delegated to profile.rs).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over profile file values.
//! - Builder methods take precedence over environment variables.
//! - A pre-acquired access token takes precedence over client credentials.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use super::profile::apply_profile;
use crate::constants::{
    DEFAULT_AUTHORITY_URL, DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_GRAPH_BASE_URL,
    DEFAULT_MAX_RETRIES, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, MAX_EXPIRY_BUFFER_SECS,
    MAX_MAX_RETRIES, MAX_PAGE_SIZE, MAX_TIMEOUT_SECS,
};
use crate::types::{AuthConfig, AuthStrategy, Config, ConnectionConfig};

/// Configuration loader that builds config from environment variables and profiles.
#[derive(Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    authority_url: Option<String>,
    tenant_id: Option<String>,
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    access_token: Option<SecretString>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
    token_expiry_buffer_seconds: Option<u64>,
    page_size: Option<u32>,
    profile_name: Option<String>,
    profile_missing: Option<String>,
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Set the active profile name to load from the config file.
    pub fn with_profile_name(mut self, name: String) -> Self {
        self.profile_name = Some(name);
        self
    }

    /// Override the config file path.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Read configuration from a profile in the config file.
    ///
    /// If the profile is not found, this records the missing profile name
    /// for later error handling in `build()`.
    pub fn from_profile(mut self) -> Result<Self, ConfigError> {
        apply_profile(&mut self)?;
        Ok(self)
    }

    /// Read configuration from environment variables.
    ///
    /// Environment variables take precedence over profile settings.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the Graph API root.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the token authority root.
    pub fn with_authority_url(mut self, url: String) -> Self {
        self.authority_url = Some(url);
        self
    }

    /// Set the tenant id.
    pub fn with_tenant_id(mut self, tenant_id: String) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    /// Set the app registration client id.
    pub fn with_client_id(mut self, client_id: String) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Set the app registration client secret.
    pub fn with_client_secret(mut self, secret: String) -> Self {
        self.client_secret = Some(SecretString::new(secret.into()));
        self
    }

    /// Set a pre-acquired access token.
    pub fn with_access_token(mut self, token: String) -> Self {
        self.access_token = Some(SecretString::new(token.into()));
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set the page size used for collection requests.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Whether enough auth material is present to ignore a missing profile.
    fn has_complete_auth(&self) -> bool {
        self.access_token.is_some()
            || (self.tenant_id.is_some() && self.client_id.is_some() && self.client_secret.is_some())
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        if let Some(ref profile_name) = self.profile_missing
            && !self.has_complete_auth()
        {
            return Err(ConfigError::ProfileNotFound(profile_name.clone()));
        }

        let base_url = validate_and_normalize_url(
            "base_url",
            self.base_url.as_deref().unwrap_or(DEFAULT_GRAPH_BASE_URL),
        )?;
        let authority_url = validate_and_normalize_url(
            "authority_url",
            self.authority_url.as_deref().unwrap_or(DEFAULT_AUTHORITY_URL),
        )?;

        let strategy = if let Some(token) = self.access_token {
            AuthStrategy::AccessToken { token }
        } else {
            match (self.tenant_id, self.client_id, self.client_secret) {
                (Some(tenant_id), Some(client_id), Some(client_secret)) => {
                    AuthStrategy::ClientCredentials {
                        tenant_id,
                        client_id,
                        client_secret,
                    }
                }
                (None, None, None) => return Err(ConfigError::MissingAuth),
                (tenant_id, client_id, client_secret) => {
                    let mut missing = Vec::new();
                    if tenant_id.is_none() {
                        missing.push("GRAPH_TENANT_ID");
                    }
                    if client_id.is_none() {
                        missing.push("GRAPH_CLIENT_ID");
                    }
                    if client_secret.is_none() {
                        missing.push("GRAPH_CLIENT_SECRET");
                    }
                    return Err(ConfigError::IncompleteClientCredentials { missing });
                }
            }
        };

        let connection = ConnectionConfig {
            base_url,
            authority_url,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            token_expiry_buffer_seconds: self
                .token_expiry_buffer_seconds
                .unwrap_or(DEFAULT_EXPIRY_BUFFER_SECS),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        };

        Self::validate_connection(&connection)?;

        Ok(Config {
            connection,
            auth: AuthConfig { strategy },
        })
    }

    /// Validates numeric connection settings against their allowed ranges.
    fn validate_connection(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        if connection.max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "max_retries ({}) exceeds maximum allowed value of {}",
                    connection.max_retries, MAX_MAX_RETRIES
                ),
            });
        }

        if connection.token_expiry_buffer_seconds > MAX_EXPIRY_BUFFER_SECS {
            return Err(ConfigError::InvalidTokenExpiryBuffer {
                message: format!(
                    "token_expiry_buffer_seconds exceeds maximum allowed value of {} seconds",
                    MAX_EXPIRY_BUFFER_SECS
                ),
            });
        }

        if connection.page_size == 0 || connection.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidPageSize {
                message: format!(
                    "page_size must be between 1 and {}, got {}",
                    MAX_PAGE_SIZE, connection.page_size
                ),
            });
        }

        Ok(())
    }

    // Internal accessor methods for use by other loader modules

    pub(crate) fn profile_name(&self) -> Option<&String> {
        self.profile_name.as_ref()
    }

    pub(crate) fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    pub(crate) fn set_profile_name(&mut self, name: Option<String>) {
        self.profile_name = name;
    }

    pub(crate) fn set_config_path(&mut self, path: Option<PathBuf>) {
        self.config_path = path;
    }

    pub(crate) fn set_profile_missing(&mut self, name: Option<String>) {
        self.profile_missing = name;
    }

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_authority_url(&mut self, url: Option<String>) {
        self.authority_url = url;
    }

    pub(crate) fn set_tenant_id(&mut self, tenant_id: Option<String>) {
        self.tenant_id = tenant_id;
    }

    pub(crate) fn set_client_id(&mut self, client_id: Option<String>) {
        self.client_id = client_id;
    }

    pub(crate) fn set_client_secret(&mut self, secret: Option<SecretString>) {
        self.client_secret = secret;
    }

    pub(crate) fn set_access_token(&mut self, token: Option<SecretString>) {
        self.access_token = token;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_max_retries(&mut self, retries: Option<usize>) {
        self.max_retries = retries;
    }

    pub(crate) fn set_token_expiry_buffer_seconds(&mut self, buffer: Option<u64>) {
        self.token_expiry_buffer_seconds = buffer;
    }

    pub(crate) fn set_page_size(&mut self, page_size: Option<u32>) {
        self.page_size = page_size;
    }
}

/// Validates and normalizes a root URL string.
///
/// Validation rules:
/// - Trim surrounding whitespace
/// - Parse as an absolute URL
/// - Require scheme is http or https
/// - Require host is present
/// - Normalize by stripping trailing slash
fn validate_and_normalize_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: var.into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. https://graph.microsoft.com/v1.0): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: var.into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: var.into(),
            message: "host is required".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
