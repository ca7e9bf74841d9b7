//! Sync command implementation.

use super::fetch_config;
use super::progress_reporter;
use crate::cli::SyncArgs;
use crate::error::add_retrieve_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use irifetch_core::ExtractionPolicy;
use irifetch_core::Retriever;
use irifetch_core::catalog;
use irifetch_core::catalog::Dataset;
use std::env;
use tracing::info;

pub fn execute(args: &SyncArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let data_root = match &args.data_root {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let selected = select(&args.only)?;

    if args.list {
        let listed: Vec<Dataset> = selected.iter().map(|d| **d).collect();
        return formatter.format_catalog(&listed, &data_root);
    }

    let retriever =
        Retriever::new(&fetch_config(&args.fetch)).context("failed to initialize HTTP client")?;

    let mut results = Vec::with_capacity(selected.len());
    for dataset in selected {
        let locator = add_retrieve_context(dataset.locator(), dataset.name)?;
        let url = locator.url();
        let policy = ExtractionPolicy::new(dataset.directory(&data_root));

        let mut progress = progress_reporter(show_progress);
        let report = add_retrieve_context(
            retriever.retrieve_with_progress(&locator, &policy, &mut *progress),
            &url,
        )
        .with_context(|| format!("data set '{}' failed", dataset.name))?;

        info!(dataset = dataset.name, status = %report.status, "data set ready");
        results.push((dataset, report));
    }

    formatter.format_sync_result(&results)
}

/// Resolves `--only` names against the catalog, keeping the given order.
fn select(only: &[String]) -> Result<Vec<&'static Dataset>> {
    if only.is_empty() {
        return Ok(catalog::IRI2016_DATASETS.iter().collect());
    }

    only.iter()
        .map(|name| {
            catalog::find(name).ok_or_else(|| {
                anyhow!(
                    "Unknown data set '{name}'\n\
                     HINT: Run 'irifetch sync --list' to see available names."
                )
            })
        })
        .collect()
}
