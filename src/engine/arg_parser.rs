use clap::Parser;
use std::path::PathBuf;

struct DefaultArgs;

impl DefaultArgs {
    pub const DIR: &'static str = ".";
}

/// Concurrent directory scanner with an interactive subprocess relay.
#[derive(Clone, Parser)]
#[command(name = "scansh", version)]
#[command(about = "Scan a directory tree; optionally run a command interactively.")]
pub struct Cli {
    /// Directory to scan. Default: current directory.
    #[arg(value_name = "DIR", default_value = DefaultArgs::DIR)]
    pub dir: PathBuf,

    /// Command to run interactively after the scan, with this terminal wired
    /// to its standard streams (e.g. `-c bash`).
    #[arg(long, short)]
    pub command: Option<String>,

    /// Arguments for the interactive command (everything after `--`).
    #[arg(last = true, value_name = "ARGS")]
    pub command_args: Vec<String>,

    /// Scan worker thread count. Default: derived from available threads and
    /// the file-descriptor limit.
    #[arg(long, short = 'w')]
    pub workers: Option<usize>,

    /// Strict mode: fail on the first unreadable directory instead of skipping it.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub strict: Option<bool>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Seconds to wait for the interactive command to exit. Default: wait forever.
    #[arg(long, value_name = "SECS")]
    pub exit_timeout: Option<u64>,
}
