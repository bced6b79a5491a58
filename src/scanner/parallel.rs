//! Work-stealing parallel scanner
//!
//! A bounded pool of worker threads drains a deque of directory jobs:
//!
//! ```text
//! Directory Queue (crossbeam deque - work stealing)
//! │
//! ├── Worker 0: pop dir → read_dir → tally leaves → push subdirs
//! ├── Worker 1: pop dir → read_dir → tally leaves → push subdirs
//! └── Worker N: pop dir → read_dir → tally leaves → push subdirs
//! │
//! └── Shared Totals behind one Mutex, merged once per directory
//! ```
//!
//! The pool is sized to the available processors rather than to the
//! number of discovered directories, so a wide or deep tree never
//! translates into unbounded thread fan-out. Each worker accumulates a
//! directory's leaf counts in a private tally and folds it into the
//! shared aggregate in one short critical section; the lock is never
//! held across filesystem I/O, and no field of the aggregate is read
//! without it.
//!
//! A run is complete when the pending-jobs counter hits zero with no
//! worker mid-directory, which is exactly "every discovered subtree has
//! been fully processed".

use super::{log_skip, read_dir_entries, ScanProgress, ScanStats, Totals};
use crate::config::ScanConfig;
use crate::error::ScanError;
use crossbeam_channel::{unbounded, Sender};
use crossbeam_deque::{Injector, Steal, Stealer, Worker as DequeWorker};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;

/// Directory work item
#[derive(Debug, Clone)]
struct DirJob {
    path: PathBuf,
}

/// Parallel scanner over a work-stealing directory queue
pub struct ParallelScanner {
    config: ScanConfig,
    totals: Arc<Mutex<Totals>>,
    skipped: Arc<AtomicU64>,
    finished: Arc<AtomicBool>,
}

impl ParallelScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            totals: Arc::new(Mutex::new(Totals::default())),
            skipped: Arc::new(AtomicU64::new(0)),
            finished: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Snapshot the shared aggregate for the live display
    pub fn progress(&self, elapsed: Duration) -> ScanProgress {
        let totals = *self.totals.lock();
        ScanProgress {
            folders: totals.folders,
            files: totals.files,
            bytes: totals.bytes,
            skipped: self.skipped.load(Ordering::Relaxed),
            elapsed,
        }
    }

    /// Run the scan to completion and return the final totals
    pub fn run(&self) -> ScanStats {
        let start = Instant::now();

        // Work-stealing deque: a global injector seeded with the root,
        // plus one local queue per worker with stealers for the rest.
        let injector: Arc<Injector<DirJob>> = Arc::new(Injector::new());
        let active_workers = Arc::new(AtomicUsize::new(0));
        let pending_work = Arc::new(AtomicU64::new(1)); // Start with 1 for root

        injector.push(DirJob {
            path: self.config.root.clone(),
        });

        let mut locals: Vec<DequeWorker<DirJob>> = Vec::new();
        let mut stealers: Vec<Stealer<DirJob>> = Vec::new();

        for _ in 0..self.config.worker_count {
            let w = DequeWorker::new_fifo();
            stealers.push(w.stealer());
            locals.push(w);
        }

        let stealers = Arc::new(stealers);

        // Skipped-path diagnostics travel over a channel so workers never
        // contend on a shared collection.
        let (skip_tx, skip_rx) = if self.config.collect_skipped {
            let (tx, rx) = unbounded::<PathBuf>();
            (Some(tx), Some(rx))
        } else {
            (None, None)
        };

        let mut handles: Vec<JoinHandle<()>> = Vec::new();

        for (id, local) in locals.into_iter().enumerate() {
            let injector = Arc::clone(&injector);
            let stealers = Arc::clone(&stealers);
            let totals = Arc::clone(&self.totals);
            let skipped = Arc::clone(&self.skipped);
            let skip_tx = skip_tx.clone();
            let active_workers = Arc::clone(&active_workers);
            let pending_work = Arc::clone(&pending_work);

            let handle = thread::Builder::new()
                .name(format!("scan-{}", id))
                .spawn(move || {
                    worker_loop(
                        id,
                        local,
                        injector,
                        stealers,
                        totals,
                        skipped,
                        skip_tx,
                        active_workers,
                        pending_work,
                    );
                })
                .expect("Failed to spawn worker thread");

            handles.push(handle);
        }

        // Drop our sender so the drain below terminates once workers exit
        drop(skip_tx);

        for handle in handles {
            let _ = handle.join();
        }

        let skipped_paths: Vec<PathBuf> = skip_rx
            .map(|rx| rx.into_iter().collect())
            .unwrap_or_default();

        self.finished.store(true, Ordering::SeqCst);

        ScanStats {
            totals: *self.totals.lock(),
            skipped: self.skipped.load(Ordering::Relaxed),
            skipped_paths,
            duration: start.elapsed(),
        }
    }

    /// Run with a periodic progress callback driven by a sampler thread
    pub fn run_with_progress<F>(&self, progress_callback: F) -> ScanStats
    where
        F: Fn(ScanProgress) + Send + 'static,
    {
        let start = Instant::now();
        let finished = Arc::clone(&self.finished);
        let totals = Arc::clone(&self.totals);
        let skipped = Arc::clone(&self.skipped);

        let progress_handle = thread::spawn(move || {
            while !finished.load(Ordering::Relaxed) {
                let snapshot = *totals.lock();
                progress_callback(ScanProgress {
                    folders: snapshot.folders,
                    files: snapshot.files,
                    bytes: snapshot.bytes,
                    skipped: skipped.load(Ordering::Relaxed),
                    elapsed: start.elapsed(),
                });
                thread::sleep(Duration::from_millis(100));
            }
        });

        let stats = self.run();
        let _ = progress_handle.join();
        stats
    }
}

/// Worker thread: drain directory jobs until the whole tree is processed
#[allow(clippy::too_many_arguments)]
fn worker_loop(
    id: usize,
    local: DequeWorker<DirJob>,
    injector: Arc<Injector<DirJob>>,
    stealers: Arc<Vec<Stealer<DirJob>>>,
    totals: Arc<Mutex<Totals>>,
    skipped: Arc<AtomicU64>,
    skip_tx: Option<Sender<PathBuf>>,
    active_workers: Arc<AtomicUsize>,
    pending_work: Arc<AtomicU64>,
) {
    debug!("Worker {} started", id);

    let mut idle_spins = 0u32;
    const MAX_IDLE_SPINS: u32 = 1000;

    loop {
        // Try to get work: local queue first, then injector, then steal
        let job = local.pop().or_else(|| {
            loop {
                match injector.steal() {
                    Steal::Success(job) => return Some(job),
                    Steal::Empty => break,
                    Steal::Retry => continue,
                }
            }
            for (i, stealer) in stealers.iter().enumerate() {
                if i == id {
                    continue;
                }
                loop {
                    match stealer.steal() {
                        Steal::Success(job) => return Some(job),
                        Steal::Empty => break,
                        Steal::Retry => continue,
                    }
                }
            }
            None
        });

        let job = match job {
            Some(job) => {
                idle_spins = 0;
                active_workers.fetch_add(1, Ordering::Relaxed);
                job
            }
            None => {
                idle_spins += 1;

                if pending_work.load(Ordering::SeqCst) == 0
                    && active_workers.load(Ordering::SeqCst) == 0
                {
                    // No queued jobs and nobody mid-directory - done
                    break;
                }

                if idle_spins > MAX_IDLE_SPINS {
                    // Yield to avoid busy spinning
                    thread::sleep(Duration::from_micros(100));
                    idle_spins = 0;
                }
                continue;
            }
        };

        debug!("Worker {} scanning: {}", id, job.path.display());

        scan_directory(
            &job,
            &local,
            &totals,
            &skipped,
            skip_tx.as_ref(),
            &pending_work,
        );

        // Mark this job as done
        pending_work.fetch_sub(1, Ordering::SeqCst);
        active_workers.fetch_sub(1, Ordering::Relaxed);
    }

    debug!("Worker {} finished", id);
}

/// Process one directory: queue its subdirectories, tally its leaves,
/// then fold the private tally into the shared aggregate
fn scan_directory(
    job: &DirJob,
    local: &DequeWorker<DirJob>,
    totals: &Mutex<Totals>,
    skipped: &AtomicU64,
    skip_tx: Option<&Sender<PathBuf>>,
    pending_work: &AtomicU64,
) {
    let entries = match read_dir_entries(&job.path) {
        Ok(entries) => entries,
        Err(err) => {
            record_skip(err, skipped, skip_tx);
            return;
        }
    };

    let mut tally = Totals::default();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                record_skip(ScanError::listing(&job.path, e), skipped, skip_tx);
                continue;
            }
        };

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                record_skip(ScanError::metadata(entry.path(), e), skipped, skip_tx);
                continue;
            }
        };

        if file_type.is_dir() {
            pending_work.fetch_add(1, Ordering::SeqCst);
            local.push(DirJob { path: entry.path() });
        } else {
            // Symlinks and special files are terminal leaves; metadata()
            // does not follow links, so cycles cannot form.
            match entry.metadata() {
                Ok(meta) => {
                    tally.files += 1;
                    tally.bytes += meta.len();
                }
                Err(e) => record_skip(ScanError::metadata(entry.path(), e), skipped, skip_tx),
            }
        }
    }

    // One critical section per directory; no I/O while the lock is held
    tally.folders = 1;
    totals.lock().merge(tally);
}

fn record_skip(err: ScanError, skipped: &AtomicU64, skip_tx: Option<&Sender<PathBuf>>) {
    log_skip(&err);
    skipped.fetch_add(1, Ordering::Relaxed);
    if let Some(tx) = skip_tx {
        let _ = tx.send(err.into_path());
    }
}
