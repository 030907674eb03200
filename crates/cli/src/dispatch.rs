//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the command handlers.
//! - Load the connection configuration for commands that call Graph.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Tracing or metrics setup (see `main`).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands;
use crate::commands::report::ReportPaths;
use crate::config_context::load_config;

pub(crate) async fn run_command(cli: Cli, cancel: &CancellationToken) -> Result<()> {
    match cli.command {
        Commands::Config { ref command } => commands::config::run(command, &cli),
        Commands::ExportReference {
            ref reference_csv,
            ref sku_csv,
            ref service_plan_csv,
        } => {
            let config = load_config(&cli)?;
            commands::export_reference::run(
                config,
                reference_csv,
                sku_csv,
                service_plan_csv,
                cli.quiet,
                cancel,
            )
            .await
        }
        Commands::Report {
            ref sku_csv,
            ref service_plan_csv,
            ref output_dir,
            ref csv_out,
            ref html_out,
            ref summary_json,
        } => {
            let config = load_config(&cli)?;
            let paths = ReportPaths {
                sku_csv: sku_csv.clone(),
                service_plan_csv: service_plan_csv.clone(),
                output_dir: output_dir.clone(),
                csv_out: csv_out.clone(),
                html_out: html_out.clone(),
                summary_json: summary_json.clone(),
            };
            commands::report::run(config, paths, cli.quiet, cancel).await
        }
    }
}
