//! dustat - Disk-Usage Summarizer
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use dustat::config::{CliArgs, Mode, ScanConfig};
use dustat::progress::{print_header, print_skipped, print_summary, ProgressReporter};
use dustat::scanner::{ParallelScanner, SequentialScanner, Strategy};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Any usage mistake - missing mode, missing path, unknown flag -
    // prints help and exits cleanly without scanning anything.
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            use clap::error::ErrorKind;
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = err.print();
                }
                _ => {
                    let _ = CliArgs::command().print_help();
                }
            }
            return Ok(());
        }
    };

    setup_logging(args.verbose)?;

    let config = ScanConfig::from_args(&args).context("Invalid configuration")?;
    let mode = args.mode();

    if config.show_progress {
        print_header(&config.root, mode_name(mode), config.worker_count);
    }

    match mode {
        Mode::Sequential => run_sequential(&config),
        Mode::Parallel => run_parallel(&config),
        Mode::Both => {
            // Two fully independent runs with independent aggregates,
            // parallel first.
            run_parallel(&config)?;
            run_sequential(&config)
        }
    }
}

fn run_parallel(config: &ScanConfig) -> Result<()> {
    let scanner = ParallelScanner::new(config.clone());

    let stats = if config.show_progress {
        let reporter = ProgressReporter::new();
        let live = reporter.clone();
        let stats = scanner.run_with_progress(move |progress| live.update(&progress));
        reporter.finish_and_clear();
        stats
    } else {
        scanner.run()
    };

    print_summary(Strategy::Parallel.label(), &stats);
    print_skipped(&stats);
    Ok(())
}

fn run_sequential(config: &ScanConfig) -> Result<()> {
    let scanner = SequentialScanner::new(config.clone());

    // The sequential scanner's counters are exclusively owned for the
    // run's duration, so the display is a plain spinner without live
    // totals.
    let stats = if config.show_progress {
        let reporter = ProgressReporter::new();
        reporter.set_status("Scanning (sequential)...");
        let stats = scanner.run();
        reporter.finish_and_clear();
        stats
    } else {
        scanner.run()
    };

    print_summary(Strategy::Sequential.label(), &stats);
    print_skipped(&stats);
    Ok(())
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Sequential => "sequential",
        Mode::Parallel => "parallel",
        Mode::Both => "both (parallel, then sequential)",
    }
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("dustat=debug,warn")
    } else {
        EnvFilter::new("dustat=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
