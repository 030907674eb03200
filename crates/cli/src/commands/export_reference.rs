//! `export-reference`: build the lookup CSVs for the tenant's subscriptions.

use std::path::Path;

use anyhow::{Context, Result};
use license_config::Config;
use license_report::lookup::materialize_lookup_rows;
use license_report::reference::{
    carry_forward_prices, read_reference_csv, read_sku_lookup, render_service_plan_lookup,
    render_sku_lookup,
};
use license_report::build_reference_lookups;
use tracing::{info, warn};

use crate::cancellation::CancellationToken;
use crate::commands::graph_client;
use crate::output::write_to_file;
use crate::progress::Spinner;

pub(crate) async fn run(
    config: Config,
    reference_csv: &Path,
    sku_csv: &Path,
    service_plan_csv: &Path,
    quiet: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let reference = read_reference_csv(reference_csv).context("Failed to load reference table")?;
    let lookups = build_reference_lookups(&reference);
    if !lookups.stats.conflicts.is_empty() {
        warn!(
            conflicts = lookups.stats.conflicts.len(),
            "Reference table has ids with conflicting names; first occurrence kept"
        );
    }

    let mut client = graph_client(&config)?;
    let spinner = Spinner::new(!quiet, "Listing subscribed SKUs");
    let skus = cancel
        .run(async {
            client
                .list_subscribed_skus()
                .await
                .context("Failed to list subscribed SKUs")
        })
        .await?;
    spinner.finish();

    let (mut sku_rows, plan_rows) = materialize_lookup_rows(&skus, &lookups);

    if sku_csv.exists() {
        let previous = read_sku_lookup(sku_csv)
            .with_context(|| format!("Failed to read existing prices from {}", sku_csv.display()))?;
        let carried = carry_forward_prices(&mut sku_rows, &previous);
        info!(carried, path = %sku_csv.display(), "Kept prices from existing SKU lookup");
    }

    write_to_file(&render_sku_lookup(&sku_rows)?, sku_csv)?;
    write_to_file(&render_service_plan_lookup(&plan_rows)?, service_plan_csv)?;

    println!("Wrote {} SKUs to {}", sku_rows.len(), sku_csv.display());
    println!(
        "Wrote {} service plans to {}",
        plan_rows.len(),
        service_plan_csv.display()
    );
    Ok(())
}
