//! Command implementations.

pub mod config;
pub mod export_reference;
pub mod report;

use anyhow::{Context, Result};
use graph_client::{GraphClient, MetricsCollector};
use license_config::Config;

/// Build a Graph client for `config` with metrics recording enabled.
pub(crate) fn graph_client(config: &Config) -> Result<GraphClient> {
    GraphClient::builder()
        .from_config(config)
        .metrics(MetricsCollector::new())
        .build()
        .context("Failed to create Graph client")
}
