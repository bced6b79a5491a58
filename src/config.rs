//! Configuration types for dustat
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Maximum reasonable worker count
const MAX_WORKERS: usize = 512;

/// Summarize disk usage of a directory tree
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dustat",
    version,
    about = "Summarize disk usage of a directory tree",
    long_about = "Walks a directory tree and reports folder count, file count, and total\n\
                  byte size, with the elapsed wall-clock time per run.\n\n\
                  Exactly one mode flag is required:\n  \
                  -s  sequential: single-threaded depth-first walk\n  \
                  -d  parallel: work-stealing pool, one worker per processor\n  \
                  -b  both: parallel run followed by an independent sequential run",
    after_help = "EXAMPLES:\n    \
        dustat -d /data\n    \
        dustat -s /home/alice\n    \
        dustat -b /var -w 16\n    \
        dustat -d /srv --list-skipped",
    group(ArgGroup::new("mode").required(true).args(["sequential", "parallel", "both"]))
)]
pub struct CliArgs {
    /// Run the single-threaded sequential scanner
    #[arg(short = 's', long)]
    pub sequential: bool,

    /// Run the parallel scanner
    #[arg(short = 'd', long)]
    pub parallel: bool,

    /// Run the parallel scanner, then the sequential scanner
    #[arg(short = 'b', long)]
    pub both: bool,

    /// Directory to summarize
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Number of worker threads for the parallel scanner
    #[arg(
        short = 'w',
        long,
        default_value_t = default_workers(),
        value_name = "NUM"
    )]
    pub workers: usize,

    /// Quiet mode - suppress the live progress display
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (log skipped nodes as they are encountered)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print every skipped path after the summary
    #[arg(long)]
    pub list_skipped: bool,
}

/// Which scanners a single invocation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Sequential scanner only
    Sequential,
    /// Parallel scanner only
    Parallel,
    /// Parallel run first, then an independent sequential run
    Both,
}

impl CliArgs {
    /// Resolve the mode flags; the clap group guarantees exactly one is set
    pub fn mode(&self) -> Mode {
        if self.both {
            Mode::Both
        } else if self.sequential {
            Mode::Sequential
        } else {
            Mode::Parallel
        }
    }
}

fn default_workers() -> usize {
    num_cpus::get()
}

/// Validated runtime configuration for a scan
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root directory to summarize
    pub root: PathBuf,

    /// Number of worker threads for the parallel scanner
    pub worker_count: usize,

    /// Show the live progress display
    pub show_progress: bool,

    /// Verbose logging
    pub verbose: bool,

    /// Collect the paths of skipped nodes into the run's stats
    pub collect_skipped: bool,
}

impl ScanConfig {
    /// Create and validate configuration from CLI arguments
    ///
    /// The root path itself is not validated here: an unreadable or missing
    /// root is handled by the scan's first listing like any other node.
    pub fn from_args(args: &CliArgs) -> Result<Self, ConfigError> {
        if args.workers == 0 || args.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: args.workers,
                max: MAX_WORKERS,
            });
        }

        Ok(Self {
            root: args.path.clone(),
            worker_count: args.workers,
            show_progress: !args.quiet,
            verbose: args.verbose,
            collect_skipped: args.list_skipped,
        })
    }
}
