//! Retrieve command implementation.

use super::fetch_config;
use super::progress_reporter;
use crate::cli::RetrieveArgs;
use crate::error::add_retrieve_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use irifetch_core::ExtractionPolicy;
use irifetch_core::ResourceLocator;
use irifetch_core::RetrieveStatus;
use irifetch_core::Retriever;
use std::env;
use std::path::Path;

pub fn execute(
    args: &RetrieveArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let directory = match &args.directory {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let locator = add_retrieve_context(
        ResourceLocator::new(args.url.as_str(), args.filename.as_str()),
        &args.url,
    )?;
    let url = locator.url();

    let retriever =
        Retriever::new(&fetch_config(&args.fetch)).context("failed to initialize HTTP client")?;
    let mut progress = progress_reporter(show_progress);
    let report = add_retrieve_context(
        retriever.retrieve_with_progress(&locator, &ExtractionPolicy::new(directory), &mut *progress),
        &url,
    )?;
    drop(progress);

    if report.status == RetrieveStatus::Stored && has_tar_suffix(locator.name()) {
        formatter.format_warning(&format!(
            "'{}' has a .tar suffix but no tar header; stored as fetched",
            locator.name()
        ));
    }

    formatter.format_retrieve_result(&report)
}

fn has_tar_suffix(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tar"))
}
