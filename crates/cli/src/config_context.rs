//! Connection configuration for command execution.
//!
//! Responsibilities:
//! - Merge profile file, environment and CLI flags into a validated `Config`.
//! - Resolve the profile file path shown by `config path`.
//!
//! Does NOT handle:
//! - Parsing of individual sources (see `license-config`).
//!
//! Invariants:
//! - Precedence, lowest to highest: profile file, environment, CLI flags.
//! - Blank `--config-path` values fall back to the platform default.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use license_config::{Config, ConfigLoader, default_config_path};

use crate::args::{Cli, path_is_blank};

/// Config file path from `--config-path` / `GRAPH_CONFIG_PATH`, ignoring blanks.
pub(crate) fn explicit_config_path(cli: &Cli) -> Option<PathBuf> {
    cli.config_path.clone().filter(|p| !path_is_blank(p))
}

/// The profile file that would be read for this invocation.
pub(crate) fn resolve_config_path(cli: &Cli) -> Result<PathBuf> {
    match explicit_config_path(cli) {
        Some(path) => Ok(path),
        None => default_config_path(),
    }
}

/// Build the connection configuration for commands that call Graph.
pub(crate) fn load_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new();

    if let Some(path) = explicit_config_path(cli) {
        loader = loader.with_config_path(path);
    }
    if let Some(ref profile_name) = cli.profile {
        loader = loader.with_profile_name(profile_name.clone());
    }

    let mut loader = loader
        .from_profile()
        .context("Failed to load configuration from profile")?
        .from_env()
        .context("Failed to load configuration from environment")?;

    if let Some(ref url) = cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(ref url) = cli.authority_url {
        loader = loader.with_authority_url(url.clone());
    }
    if let Some(ref tenant) = cli.tenant_id {
        loader = loader.with_tenant_id(tenant.clone());
    }
    if let Some(ref client_id) = cli.client_id {
        loader = loader.with_client_id(client_id.clone());
    }
    if let Some(ref secret) = cli.client_secret {
        loader = loader.with_client_secret(secret.clone());
    }
    if let Some(ref token) = cli.access_token {
        loader = loader.with_access_token(token.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }

    loader.build().context("Failed to build configuration")
}
