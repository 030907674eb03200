//! Profile file loading for configuration.
//!
//! Responsibilities:
//! - Resolve the profile file path (explicit override or platform default).
//! - Apply the selected profile's settings to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Environment variable parsing (see env.rs).
//! - Building the final Config (see builder.rs).
//!
//! Invariants:
//! - Profile settings are applied before environment variables (env vars take precedence).
//! - Missing profiles are recorded for later error handling in build().

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::profile_file::{ProfileFile, default_config_path};
use crate::types::ProfileConfig;

/// Apply profile configuration from the profile file to the loader.
///
/// If the profile (or the whole file) is not found, this records the missing
/// profile name for later error handling in `build()`.
pub fn apply_profile(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let profile_name = match loader.profile_name() {
        Some(name) => name.clone(),
        None => return Ok(()),
    };

    let config_path = match loader.config_path() {
        Some(path) => path.clone(),
        None => {
            default_config_path().map_err(|e| ConfigError::ConfigDirUnavailable(e.to_string()))?
        }
    };

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "profile file does not exist");
        loader.set_profile_missing(Some(profile_name));
        return Ok(());
    }

    let file = ProfileFile::load(&config_path)?;
    match file.profile(&profile_name) {
        Some(profile) => {
            apply_profile_config(loader, profile);
            Ok(())
        }
        None => {
            loader.set_profile_missing(Some(profile_name));
            Ok(())
        }
    }
}

/// Apply profile configuration values to the loader.
fn apply_profile_config(loader: &mut ConfigLoader, profile: &ProfileConfig) {
    if let Some(url) = &profile.base_url {
        loader.set_base_url(Some(url.clone()));
    }
    if let Some(url) = &profile.authority_url {
        loader.set_authority_url(Some(url.clone()));
    }
    if let Some(tenant) = &profile.tenant_id {
        loader.set_tenant_id(Some(tenant.clone()));
    }
    if let Some(client) = &profile.client_id {
        loader.set_client_id(Some(client.clone()));
    }
    if let Some(secret) = &profile.client_secret {
        loader.set_client_secret(Some(secret.clone()));
    }
    if let Some(token) = &profile.access_token {
        loader.set_access_token(Some(token.clone()));
    }
    if let Some(skip) = profile.skip_verify {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = profile.timeout_seconds {
        loader.set_timeout(Some(std::time::Duration::from_secs(secs)));
    }
    if let Some(retries) = profile.max_retries {
        loader.set_max_retries(Some(retries));
    }
    if let Some(buffer) = profile.token_expiry_buffer_seconds {
        loader.set_token_expiry_buffer_seconds(Some(buffer));
    }
    if let Some(page_size) = profile.page_size {
        loader.set_page_size(Some(page_size));
    }
}
