//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not build the connection config (see `main`).

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::commands;

/// Vendor reference table file name as published.
pub const DEFAULT_REFERENCE_CSV: &str =
    "Product names and service plan identifiers for licensing.csv";
pub const DEFAULT_SKU_CSV: &str = "SkuLookup.csv";
pub const DEFAULT_SERVICE_PLAN_CSV: &str = "ServicePlanLookup.csv";

#[derive(Parser)]
#[command(name = "license-cli")]
#[command(about = "Tenant license reporting against Microsoft Graph", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  license-cli export-reference --reference-csv ./reference.csv\n  license-cli report --output-dir ./reports\n  license-cli --profile contoso report --summary-json summary.json\n  license-cli config show\n"
)]
pub struct Cli {
    /// Graph API root (e.g., https://graph.microsoft.com/v1.0)
    #[arg(short, long, global = true, env = "GRAPH_BASE_URL")]
    pub base_url: Option<String>,

    /// Token authority root (e.g., https://login.microsoftonline.com)
    #[arg(long, global = true, env = "GRAPH_AUTHORITY_URL")]
    pub authority_url: Option<String>,

    /// Directory (tenant) id or primary domain
    #[arg(short, long, global = true, env = "GRAPH_TENANT_ID")]
    pub tenant_id: Option<String>,

    /// App registration (client) id
    #[arg(short, long, global = true, env = "GRAPH_CLIENT_ID")]
    pub client_id: Option<String>,

    /// App registration client secret
    #[arg(long, global = true, env = "GRAPH_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Pre-acquired bearer token (used instead of client credentials)
    #[arg(short, long, global = true, env = "GRAPH_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "GRAPH_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for throttled requests
    #[arg(long, global = true, env = "GRAPH_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Skip TLS certificate verification
    #[arg(long, global = true, env = "GRAPH_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Profile name to load from the config file
    #[arg(long, global = true, env = "GRAPH_PROFILE")]
    pub profile: Option<String>,

    /// Path to a custom configuration file (overrides default location)
    #[arg(long, global = true, env = "GRAPH_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Suppress all progress output (spinners / progress bars).
    ///
    /// Progress indicators always write to STDERR; this flag disables them entirely.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// OTLP endpoint for exporting traces (e.g., http://localhost:4317)
    #[arg(long, global = true, env = "GRAPH_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Service name reported with exported traces
    #[arg(long, global = true, env = "OTEL_SERVICE_NAME")]
    pub otel_service_name: Option<String>,

    /// Serve Prometheus metrics on this address (e.g., 127.0.0.1:9090)
    #[arg(long, global = true, env = "GRAPH_METRICS_BIND", value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the SKU and service-plan lookup CSVs from the tenant's subscriptions
    ExportReference {
        /// Vendor "product names and service plan identifiers" CSV
        #[arg(long, env = "LICENSE_REFERENCE_CSV", default_value = DEFAULT_REFERENCE_CSV)]
        reference_csv: PathBuf,

        /// SKU lookup CSV to write; existing prices in it are kept
        #[arg(long, env = "LICENSE_SKU_CSV", default_value = DEFAULT_SKU_CSV)]
        sku_csv: PathBuf,

        /// Service-plan lookup CSV to write
        #[arg(long, env = "LICENSE_SERVICE_PLAN_CSV", default_value = DEFAULT_SERVICE_PLAN_CSV)]
        service_plan_csv: PathBuf,
    },

    /// Generate the per-user license report
    Report {
        /// SKU lookup CSV (add Price/Currency columns to enable costs)
        #[arg(long, env = "LICENSE_SKU_CSV", default_value = DEFAULT_SKU_CSV)]
        sku_csv: PathBuf,

        /// Service-plan lookup CSV
        #[arg(long, env = "LICENSE_SERVICE_PLAN_CSV", default_value = DEFAULT_SERVICE_PLAN_CSV)]
        service_plan_csv: PathBuf,

        /// Directory for LicenseReport_<date>.csv and .html
        #[arg(long, env = "LICENSE_OUTPUT_DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Explicit CSV output path (overrides --output-dir for the CSV)
        #[arg(long, value_name = "FILE")]
        csv_out: Option<PathBuf>,

        /// Explicit HTML output path (overrides --output-dir for the HTML)
        #[arg(long, value_name = "FILE")]
        html_out: Option<PathBuf>,

        /// Also write aggregates and tenant counters as JSON
        #[arg(long, value_name = "FILE")]
        summary_json: Option<PathBuf>,
    },

    /// Inspect the effective configuration
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommand,
    },
}

impl Commands {
    /// Whether the command talks to Graph and therefore needs credentials.
    pub fn needs_connection(&self) -> bool {
        !matches!(self, Commands::Config { .. })
    }
}

/// Returns true if the path is empty or contains only whitespace.
pub(crate) fn path_is_blank(path: &Path) -> bool {
    path.to_string_lossy().trim().is_empty()
}
