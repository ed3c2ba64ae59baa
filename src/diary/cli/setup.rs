use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Returns the version string, with the git hash and commit date when known.
/// Format: "0.3.0" or "0.3.0@abc1234 2024-01-15"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("DIARY_GIT_HASH");
    const COMMIT_DATE: &str = env!("DIARY_COMMIT_DATE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "diary", bin_name = "diary", version = get_version())]
#[command(about = "A personal diary for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Database file to use instead of the one in the data directory
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Items per page in list screens
    #[arg(long, global = true, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub page_size: Option<u16>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive diary (the default)
    Open,

    /// Print totals and entries per author
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print where the diary keeps its files
    Path,
}
