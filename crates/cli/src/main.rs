//! license-cli - tenant license reporting against Microsoft Graph.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Initialize tracing, optional OTLP export and the optional metrics exporter.
//! - Run the reference export or report generation and map failures to exit codes.
//!
//! Does NOT handle:
//! - Graph REST calls (see `crates/client`).
//! - Report business logic or rendering (see `crates/report`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap defaults.
//! - Results go to stdout; logs and progress go to stderr.

mod args;
mod cancellation;
mod commands;
mod config_context;
mod dispatch;
mod error;
mod output;
mod progress;

use args::Cli;
use cancellation::{CancellationToken, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use graph_client::{MetricsExporter, TracingConfig};
use license_config::ConfigLoader;

#[tokio::main]
async fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::ValidationError.as_i32());
    }

    let cli = Cli::parse();

    let mut tracing_config = TracingConfig::new()
        .with_service_name(
            cli.otel_service_name
                .clone()
                .unwrap_or_else(|| "license-cli".to_string()),
        )
        .with_default_filter("warn");
    if let Some(ref endpoint) = cli.otlp_endpoint {
        tracing_config = tracing_config.with_otlp_endpoint(endpoint);
    }
    let tracing_guard = match tracing_config.init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize tracing: {}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };

    let _metrics_exporter = match cli.metrics_bind {
        Some(ref bind_addr) if cli.command.needs_connection() => {
            match MetricsExporter::install(bind_addr) {
                Ok(exporter) => Some(exporter),
                Err(e) => {
                    eprintln!("Failed to start metrics exporter: {}", e);
                    std::process::exit(ExitCode::GeneralError.as_i32());
                }
            }
        }
        _ => None,
    };

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    let exit_code = match run_command(cli, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    tracing_guard.shutdown();
    std::process::exit(exit_code.as_i32());
}
