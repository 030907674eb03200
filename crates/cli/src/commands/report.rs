//! `report`: generate the per-user license report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use license_config::Config;
use license_report::reference::{read_service_plan_lookup, read_sku_lookup};
use license_report::render::{render_csv, render_html, render_summary_json};
use license_report::{LicenseReport, ReportBuilder};
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::graph_client;
use crate::output::{dated_report_path, write_to_file};
use crate::progress::{Spinner, UserProgress};

/// Input and output locations for a report run.
pub(crate) struct ReportPaths {
    pub sku_csv: PathBuf,
    pub service_plan_csv: PathBuf,
    pub output_dir: PathBuf,
    pub csv_out: Option<PathBuf>,
    pub html_out: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
}

pub(crate) async fn run(
    config: Config,
    paths: ReportPaths,
    quiet: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let skus = read_sku_lookup(&paths.sku_csv).context("Failed to load SKU lookup")?;
    let service_plans =
        read_service_plan_lookup(&paths.service_plan_csv).context("Failed to load service plan lookup")?;
    if !skus.pricing_enabled() {
        info!("SKU lookup has no prices; cost analysis is disabled");
    }

    let mut client = graph_client(&config)?;

    let spinner = Spinner::new(!quiet, "Listing subscribed SKUs");
    let subscribed = cancel
        .run(async {
            client
                .list_subscribed_skus()
                .await
                .context("Failed to list subscribed SKUs")
        })
        .await?;
    spinner.finish();

    let mut progress = UserProgress::new(!quiet);
    let users = cancel
        .run(async {
            client
                .list_licensed_users_with_progress(|fetched, total| progress.update(fetched, total))
                .await
                .context("Failed to list licensed users")
        })
        .await?;
    progress.finish(users.len());

    let spinner = Spinner::new(!quiet, "Resolving groups and building report");
    let builder = ReportBuilder::new(&skus, &service_plans);
    let report = cancel
        .run(async {
            builder
                .build(users, &subscribed, &mut client)
                .await
                .context("Failed to build license report")
        })
        .await?;
    spinner.finish();
    info!(groups = client.cached_group_count(), "Resolved group names");

    let csv_path = paths
        .csv_out
        .unwrap_or_else(|| dated_report_path(&paths.output_dir, report.generated_at, "csv"));
    let html_path = paths
        .html_out
        .unwrap_or_else(|| dated_report_path(&paths.output_dir, report.generated_at, "html"));

    write_to_file(&render_csv(&report)?, &csv_path)?;
    write_to_file(&render_html(&report), &html_path)?;
    if let Some(ref json_path) = paths.summary_json {
        write_to_file(&render_summary_json(&report)?, json_path)?;
    }

    print_summary(&report);
    println!("CSV report: {}", csv_path.display());
    println!("HTML report: {}", html_path.display());
    if let Some(json_path) = paths.summary_json {
        println!("JSON summary: {}", json_path.display());
    }
    Ok(())
}

fn print_summary(report: &LicenseReport) {
    let summary = &report.summary;
    println!("Licensed users: {}", summary.total_users);
    println!("License assignments: {}", summary.total_assignments);
    println!("License Errors: {}", summary.license_errors);
    println!("Users with duplicate licenses: {}", summary.users_with_duplicates);
    println!(
        "Inactive users: {} ({} never logged in, {} unknown)",
        summary.inactive_users, summary.never_signed_in, summary.sign_in_unknown
    );
    if report.pricing_enabled {
        let currency = report.currency.as_deref().unwrap_or_default();
        if let Some(purchased) = summary.total_purchased_annual_cost {
            println!("Purchased annual cost: {purchased:.2} {currency}");
        }
        if let Some(assigned) = summary.total_assigned_annual_cost {
            println!("Assigned annual cost: {assigned:.2} {currency}");
        }
        match summary.utilization_percent {
            Some(percent) => println!("Utilization: {percent}%"),
            None => println!("Utilization: N/A"),
        }
    }
}
