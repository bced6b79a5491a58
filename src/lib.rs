//! dustat - Disk-Usage Summarizer
//!
//! A tool that walks a directory tree and reports how many folders and
//! files it holds and how many bytes they occupy, timing the walk. Two
//! interchangeable traversal strategies compute the same totals:
//!
//! - **Sequential**: a single-threaded depth-first walk whose counters
//!   are exclusively owned and need no synchronization.
//!
//! - **Parallel**: a pool of worker threads (one per processor by
//!   default) draining a work-stealing queue of directory jobs, merging
//!   per-directory tallies into one mutex-guarded aggregate.
//!
//! Both strategies count best-effort: a node that cannot be listed -
//! permission denied, vanished mid-walk - is excluded from the totals
//! and the walk carries on. Skipped nodes are tallied separately so
//! partial results are distinguishable from clean runs.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        CLI (main)                          │
//! │   -s sequential · -d parallel · -b both (parallel first)   │
//! └──────────────────────────┬────────────────────────────────┘
//!                            │ run_strategy(config, strategy)
//!                            ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │                      scanner module                        │
//! │  ┌──────────────────┐        ┌──────────────────────────┐ │
//! │  │ SequentialScanner│        │     ParallelScanner      │ │
//! │  │ recursive walk,  │        │ Injector + worker deques │ │
//! │  │ owned Totals     │        │ Mutex<Totals>, skip chan │ │
//! │  └──────────────────┘        └──────────────────────────┘ │
//! │              each run: fresh Totals, own timer             │
//! └──────────────────────────┬────────────────────────────────┘
//!                            ▼
//!                 ScanStats { totals, skipped, duration }
//! ```
//!
//! # Example
//!
//! ```bash
//! # Parallel scan
//! dustat -d /data
//!
//! # Compare both strategies on the same tree
//! dustat -b /data -w 16
//!
//! # Show which nodes were excluded from the totals
//! dustat -d /data --list-skipped
//! ```

pub mod config;
pub mod error;
pub mod progress;
pub mod scanner;

pub use config::{CliArgs, Mode, ScanConfig};
pub use error::{ConfigError, ScanError};
pub use scanner::{
    run_strategy, ParallelScanner, ScanProgress, ScanStats, SequentialScanner, Strategy, Totals,
};
