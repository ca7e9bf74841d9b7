//! Command implementations.

pub mod check;
pub mod completion;
pub mod retrieve;
pub mod sync;

use crate::cli::FetchArgs;
use crate::progress::CliProgress;
use irifetch_core::FetchConfig;
use irifetch_core::FetchProgress;
use irifetch_core::NoopProgress;

/// Builds the client configuration from command-line flags.
pub fn fetch_config(args: &FetchArgs) -> FetchConfig {
    let mut config = FetchConfig::default().with_timeout(args.timeout);
    if let Some(agent) = &args.user_agent {
        config = config.with_user_agent(agent.clone());
    }
    config
}

/// Picks a progress bar when output goes to a terminal.
pub fn progress_reporter(show_progress: bool) -> Box<dyn FetchProgress> {
    if show_progress && CliProgress::should_show() {
        Box::new(CliProgress::new())
    } else {
        Box::new(NoopProgress)
    }
}
