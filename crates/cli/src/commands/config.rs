//! Configuration inspection commands.

use anyhow::Result;
use clap::Subcommand;
use license_config::{AuthStrategy, Config};
use serde::Serialize;

use crate::args::Cli;
use crate::config_context::{load_config, resolve_config_path};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration with secrets redacted
    Show,

    /// Print the profile file location
    Path,
}

pub fn run(command: &ConfigCommand, cli: &Cli) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let config = load_config(cli)?;
            println!("{}", serde_json::to_string_pretty(&redacted(&config))?);
        }
        ConfigCommand::Path => {
            println!("{}", resolve_config_path(cli)?.display());
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ConfigDisplay<'a> {
    base_url: &'a str,
    authority_url: &'a str,
    auth: &'static str,
    tenant_id: Option<&'a str>,
    client_id: Option<&'a str>,
    client_secret: Option<&'static str>,
    access_token: Option<&'static str>,
    skip_verify: bool,
    timeout_seconds: u64,
    max_retries: usize,
    token_expiry_buffer_seconds: u64,
    page_size: u32,
}

fn redacted(config: &Config) -> ConfigDisplay<'_> {
    let connection = &config.connection;
    let (auth, tenant_id, client_id, client_secret, access_token) = match &config.auth.strategy {
        AuthStrategy::ClientCredentials {
            tenant_id,
            client_id,
            ..
        } => (
            "client_credentials",
            Some(tenant_id.as_str()),
            Some(client_id.as_str()),
            Some("****"),
            None,
        ),
        AuthStrategy::AccessToken { .. } => ("access_token", None, None, None, Some("****")),
    };

    ConfigDisplay {
        base_url: &connection.base_url,
        authority_url: &connection.authority_url,
        auth,
        tenant_id,
        client_id,
        client_secret,
        access_token,
        skip_verify: connection.skip_verify,
        timeout_seconds: connection.timeout.as_secs(),
        max_retries: connection.max_retries,
        token_expiry_buffer_seconds: connection.token_expiry_buffer_seconds,
        page_size: connection.page_size,
    }
}
