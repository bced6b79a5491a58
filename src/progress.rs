//! Progress reporting and result rendering
//!
//! Provides the live scan display using indicatif progress bars, plus the
//! per-run summary block printed once a scanner finishes.

use crate::scanner::{ScanProgress, ScanStats};
use console::style;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Progress reporter that displays live scan status
#[derive(Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new spinner-style reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update the display from a scan snapshot
    pub fn update(&self, progress: &ScanProgress) {
        let msg = format!(
            "Folders: {} | Files: {} | Size: {} | Rate: {:.0}/s",
            format_number(progress.folders),
            format_number(progress.files),
            format_size(progress.bytes, BINARY),
            progress.entries_per_second(),
        );

        self.bar.set_message(msg);
    }

    /// Set a status message
    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    /// Finish and clear the display
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Print a header at the start of the invocation
pub fn print_header(root: &Path, mode: &str, workers: usize) {
    println!();
    println!(
        "{} {}",
        style("dustat").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Path:").bold(), root.display());
    println!("  {} {}", style("Mode:").bold(), mode);
    println!("  {} {}", style("Workers:").bold(), workers);
    println!();
}

/// Print the summary block for one completed run
pub fn print_summary(strategy: &str, stats: &ScanStats) {
    println!();
    println!(
        "{}",
        style(format!("{strategy} scan complete")).green().bold()
    );
    println!("{}", style("─".repeat(50)).dim());
    println!(
        "  {} {:.3}s",
        style("Elapsed:").bold(),
        stats.duration.as_secs_f64()
    );
    println!(
        "  {} {} folders, {} files, {} bytes ({})",
        style("Totals:").bold(),
        format_number(stats.totals.folders),
        format_number(stats.totals.files),
        format_number(stats.totals.bytes),
        format_size(stats.totals.bytes, BINARY),
    );
    if stats.skipped > 0 {
        println!(
            "  {} {}",
            style("Skipped:").yellow().bold(),
            format_number(stats.skipped)
        );
    }
    println!();
}

/// Print the collected skipped paths, if any were recorded
pub fn print_skipped(stats: &ScanStats) {
    for path in &stats.skipped_paths {
        println!("  {} {}", style("skipped").yellow(), path.display());
    }
    if !stats.skipped_paths.is_empty() {
        println!();
    }
}
