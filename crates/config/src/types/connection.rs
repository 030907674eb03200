//! Connection configuration types.
//!
//! Responsibilities:
//! - Define connection settings (Graph root, authority, TLS verification, timeouts, retries, paging).
//! - Define the main `Config` structure combining connection and auth.
//! - Provide convenience constructors for common config patterns.
//!
//! Does NOT handle:
//! - Configuration loading from files/env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All duration fields are serialized as seconds (integers).
//! - Default values come from `constants`, not magic numbers.

use crate::constants::{
    DEFAULT_AUTHORITY_URL, DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_GRAPH_BASE_URL, DEFAULT_MAX_RETRIES,
    DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS,
};
use crate::types::auth::{AuthConfig, AuthStrategy};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection configuration for Microsoft Graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Graph API root, e.g. `https://graph.microsoft.com/v1.0`
    pub base_url: String,
    /// Token authority root, e.g. `https://login.microsoftonline.com`
    #[serde(default = "default_authority_url")]
    pub authority_url: String,
    /// Whether to skip TLS verification (proxies with self-signed certificates)
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Maximum number of retries for throttled requests
    pub max_retries: usize,
    /// Seconds before token expiry at which a fresh token is requested
    #[serde(default = "default_token_expiry_buffer")]
    pub token_expiry_buffer_seconds: u64,
    /// `$top` used when paging through collections
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

pub(crate) fn default_authority_url() -> String {
    DEFAULT_AUTHORITY_URL.to_string()
}

pub(crate) fn default_token_expiry_buffer() -> u64 {
    DEFAULT_EXPIRY_BUFFER_SECS
}

pub(crate) fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl ConnectionConfig {
    /// Connection settings pointing at the public Graph cloud with defaults.
    pub fn graph_defaults() -> Self {
        Self {
            base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            authority_url: default_authority_url(),
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            token_expiry_buffer_seconds: default_token_expiry_buffer(),
            page_size: default_page_size(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Authentication settings
    pub auth: AuthConfig,
}

impl Config {
    /// Create a config for a pre-acquired bearer token against `base_url`.
    pub fn with_access_token(base_url: String, token: SecretString) -> Self {
        Self {
            connection: ConnectionConfig {
                base_url,
                ..ConnectionConfig::graph_defaults()
            },
            auth: AuthConfig {
                strategy: AuthStrategy::AccessToken { token },
            },
        }
    }

    /// Create a config for the client-credentials grant.
    pub fn with_client_credentials(
        base_url: String,
        tenant_id: String,
        client_id: String,
        client_secret: SecretString,
    ) -> Self {
        Self {
            connection: ConnectionConfig {
                base_url,
                ..ConnectionConfig::graph_defaults()
            },
            auth: AuthConfig {
                strategy: AuthStrategy::ClientCredentials {
                    tenant_id,
                    client_id,
                    client_secret,
                },
            },
        }
    }
}
