//! Single-threaded depth-first scanner
//!
//! The baseline strategy: one thread of control walks the tree, so the
//! totals need no synchronization at all. Subdirectories are visited
//! before the current directory's own leaves are tallied, and the folder
//! count for a directory lands only after its whole subtree has been
//! processed. Callers observe none of that ordering; only the final
//! totals are reported.

use super::{log_skip, read_dir_entries, ScanStats, Totals};
use crate::config::ScanConfig;
use crate::error::ScanError;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Depth-first scanner with exclusively owned state
pub struct SequentialScanner {
    config: ScanConfig,
}

impl SequentialScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Walk the configured root to completion and return the final totals
    pub fn run(&self) -> ScanStats {
        let start = Instant::now();
        let mut totals = Totals::default();
        let mut skips = SkipLog::new(self.config.collect_skipped);

        visit_dir(&self.config.root, &mut totals, &mut skips);

        ScanStats {
            totals,
            skipped: skips.count,
            skipped_paths: skips.paths.unwrap_or_default(),
            duration: start.elapsed(),
        }
    }
}

/// Suppressed-node record for a single run
struct SkipLog {
    count: u64,
    paths: Option<Vec<PathBuf>>,
}

impl SkipLog {
    fn new(collect: bool) -> Self {
        Self {
            count: 0,
            paths: collect.then(Vec::new),
        }
    }

    fn record(&mut self, err: ScanError) {
        log_skip(&err);
        self.count += 1;
        if let Some(paths) = &mut self.paths {
            paths.push(err.into_path());
        }
    }
}

/// Recursively scan one directory
///
/// A listing failure abandons this node: whatever siblings contributed
/// stays in the totals, this subtree adds nothing further, and no error
/// reaches the caller.
fn visit_dir(path: &Path, totals: &mut Totals, skips: &mut SkipLog) {
    let entries = match read_dir_entries(path) {
        Ok(entries) => entries,
        Err(err) => {
            skips.record(err);
            return;
        }
    };

    let mut subdirs = Vec::new();
    let mut files = 0u64;
    let mut bytes = 0u64;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                skips.record(ScanError::listing(path, e));
                continue;
            }
        };

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                skips.record(ScanError::metadata(entry.path(), e));
                continue;
            }
        };

        if file_type.is_dir() {
            subdirs.push(entry.path());
        } else {
            // Symlinks and special files are terminal leaves; metadata()
            // does not follow links, so cycles cannot form.
            match entry.metadata() {
                Ok(meta) => {
                    files += 1;
                    bytes += meta.len();
                }
                Err(e) => skips.record(ScanError::metadata(entry.path(), e)),
            }
        }
    }

    for dir in &subdirs {
        visit_dir(dir, totals, skips);
    }

    totals.files += files;
    totals.bytes += bytes;
    totals.folders += 1;
}
