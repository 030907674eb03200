//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `GRAPH_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//! - Provide a helper for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Loading from profile files (see profile.rs).
//! - Building the final Config (see builder.rs).
//!
//! Invariants:
//! - Environment variables take precedence over profile settings.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Invalid numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse an environment variable into `T`, mapping failures to `InvalidValue`.
fn parse_env<T: FromStr>(key: &str, expectation: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: expectation.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("GRAPH_BASE_URL") {
        loader.set_base_url(Some(url));
    }
    if let Some(url) = env_var_or_none("GRAPH_AUTHORITY_URL") {
        loader.set_authority_url(Some(url));
    }
    if let Some(tenant) = env_var_or_none("GRAPH_TENANT_ID") {
        loader.set_tenant_id(Some(tenant));
    }
    if let Some(client) = env_var_or_none("GRAPH_CLIENT_ID") {
        loader.set_client_id(Some(client));
    }
    if let Some(secret) = env_var_or_none("GRAPH_CLIENT_SECRET") {
        loader.set_client_secret(Some(SecretString::new(secret.into())));
    }
    if let Some(token) = env_var_or_none("GRAPH_ACCESS_TOKEN") {
        loader.set_access_token(Some(SecretString::new(token.into())));
    }
    if let Some(skip) = parse_env::<bool>("GRAPH_SKIP_VERIFY", "must be true or false")? {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = parse_env::<u64>("GRAPH_TIMEOUT", "must be a number")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) =
        parse_env::<usize>("GRAPH_MAX_RETRIES", "must be a non-negative integer")?
    {
        loader.set_max_retries(Some(retries));
    }
    if let Some(buffer) = parse_env::<u64>("GRAPH_TOKEN_EXPIRY_BUFFER", "must be a number")? {
        loader.set_token_expiry_buffer_seconds(Some(buffer));
    }
    if let Some(page_size) = parse_env::<u32>("GRAPH_PAGE_SIZE", "must be a positive integer")? {
        loader.set_page_size(Some(page_size));
    }

    // Profile selection, unless already set by the CLI.
    if loader.config_path().is_none()
        && let Some(path) = env_var_or_none("GRAPH_CONFIG_PATH")
    {
        loader.set_config_path(Some(path.into()));
    }
    if loader.profile_name().is_none()
        && let Some(profile) = env_var_or_none("GRAPH_PROFILE")
    {
        loader.set_profile_name(Some(profile));
    }

    Ok(())
}
