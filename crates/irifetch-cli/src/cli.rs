//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "irifetch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download a file and unpack it if it is a tar archive
    Retrieve(RetrieveArgs),
    /// Download every IRI-2016 data set into a data root
    Sync(SyncArgs),
    /// Inspect a local file and validate its members without writing
    Check(CheckArgs),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Client settings shared by commands that hit the network.
#[derive(clap::Args)]
pub struct FetchArgs {
    /// Abort a request that takes longer than this (e.g. 90, 30s, 5m)
    #[arg(long, value_name = "DURATION", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Override the User-Agent header
    #[arg(long, value_name = "AGENT")]
    pub user_agent: Option<String>,
}

#[derive(clap::Args)]
pub struct RetrieveArgs {
    /// Directory URL the file is served from
    #[arg(value_name = "URL")]
    pub url: String,

    /// Remote file name, also used for the local copy
    #[arg(value_name = "FILENAME")]
    pub filename: String,

    /// Target directory (default: current directory)
    #[arg(value_name = "DIR")]
    pub directory: Option<PathBuf>,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[derive(clap::Args)]
pub struct SyncArgs {
    /// Data root the catalog layout is created under (default: current directory)
    #[arg(value_name = "DATA_ROOT")]
    pub data_root: Option<PathBuf>,

    /// Only retrieve the named data set (can be repeated)
    #[arg(long, value_name = "NAME")]
    pub only: Vec<String>,

    /// Print the catalog and exit
    #[arg(long)]
    pub list: bool,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Path to the local file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Directory members are validated against (default: current directory)
    #[arg(value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

/// Parse a duration in seconds with optional suffix (s, m, h)
#[allow(clippy::option_if_let_else)]
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('h') {
        (stripped, 3600)
    } else if let Some(stripped) = s.strip_suffix('m') {
        (stripped, 60)
    } else if let Some(stripped) = s.strip_suffix('s') {
        (stripped, 1)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid duration: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("duration overflow: {s}"))
        })
        .and_then(|secs| {
            if secs == 0 {
                Err("duration must be positive".to_string())
            } else {
                Ok(Duration::from_secs(secs))
            }
        })
}
