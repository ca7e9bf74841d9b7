//! Check command implementation.

use crate::cli::CheckArgs;
use crate::error::add_retrieve_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use irifetch_core::inspect;
use std::env;

pub fn execute(args: &CheckArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let directory = match &args.directory {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let subject = args.file.display().to_string();
    let inspection = add_retrieve_context(inspect(&args.file, &directory), &subject)?;

    formatter.format_inspection(&args.file, &inspection)?;

    match &inspection.rejected {
        None => Ok(()),
        Some((member, rule)) => {
            bail!(
                "Archive '{subject}' failed validation at '{}': {rule}",
                member.display()
            )
        }
    }
}
