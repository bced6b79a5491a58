//! Directory scanners
//!
//! Two scanners compute the same totals under different concurrency
//! disciplines:
//!
//! ```text
//!                  ┌──────────────────────────┐
//!                  │      run_strategy        │
//!                  │  fresh Totals per run    │
//!                  └─────┬──────────────┬─────┘
//!                        │              │
//!          ┌─────────────▼───┐   ┌──────▼──────────────────┐
//!          │ SequentialScan  │   │    ParallelScanner      │
//!          │ one thread,     │   │ work-stealing deque,    │
//!          │ unsynchronized  │   │ N workers, one Mutex    │
//!          └─────────────────┘   └─────────────────────────┘
//! ```
//!
//! Both scanners share the same best-effort failure policy: a node that
//! cannot be listed contributes nothing and the walk continues.

pub mod parallel;
pub mod sequential;

use crate::config::ScanConfig;
use crate::error::ScanError;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub use parallel::ParallelScanner;
pub use sequential::SequentialScanner;

/// Traversal strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Single-threaded depth-first walk
    Sequential,
    /// Work-stealing pool of worker threads
    Parallel,
}

impl Strategy {
    /// Human-readable name used to label run output
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Sequential => "Sequential",
            Strategy::Parallel => "Parallel",
        }
    }
}

/// The counter aggregate accumulated over one scan run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Directories successfully listed, the scanned root included
    pub folders: u64,
    /// Non-directory entries seen
    pub files: u64,
    /// Sum of file byte lengths
    pub bytes: u64,
}

impl Totals {
    /// Fold another tally into this one
    pub fn merge(&mut self, other: Totals) {
        self.folders += other.folders;
        self.files += other.files;
        self.bytes += other.bytes;
    }
}

/// Result from one scan run
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    /// Final counter aggregate
    pub totals: Totals,
    /// Nodes excluded by the best-effort policy
    pub skipped: u64,
    /// Paths of skipped nodes; populated only when collection is enabled
    pub skipped_paths: Vec<PathBuf>,
    /// Wall-clock time of the run
    pub duration: Duration,
}

/// Point-in-time snapshot for the live progress display
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanProgress {
    pub folders: u64,
    pub files: u64,
    pub bytes: u64,
    pub skipped: u64,
    pub elapsed: Duration,
}

impl ScanProgress {
    pub fn entries_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.files + self.folders) as f64 / secs
        } else {
            0.0
        }
    }
}

/// Run the chosen scanner once against the configured root
///
/// Each call instantiates a fresh scanner with a fresh aggregate; two runs
/// never share state. The elapsed time in the returned stats is measured
/// inside the run itself.
pub fn run_strategy(config: &ScanConfig, strategy: Strategy) -> ScanStats {
    match strategy {
        Strategy::Sequential => SequentialScanner::new(config.clone()).run(),
        Strategy::Parallel => ParallelScanner::new(config.clone()).run(),
    }
}

/// List a directory, classifying the failure on error
pub(crate) fn read_dir_entries(path: &Path) -> Result<fs::ReadDir, ScanError> {
    fs::read_dir(path).map_err(|e| ScanError::listing(path, e))
}

/// Log a suppressed node at the level its classification calls for
pub(crate) fn log_skip(err: &ScanError) {
    if err.is_expected() {
        debug!("Skipping {}: {}", err.path().display(), err);
    } else {
        warn!("Skipping {}: {}", err.path().display(), err);
    }
}
