//! CLI entrypoint for the minunit example harness.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use minunit_core::Session;
use minunit_core::clock::{Clock, is_failed, system_clock};
use minunit_core::structured_log::{LogEmitter, validate_log_file};
use serde::Serialize;

/// Runs and inspects the bundled minunit suites.
#[derive(Debug, Parser)]
#[command(name = "harness")]
#[command(about = "Example harness for the minunit test engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the bundled suites and print the report. Exits with the failure count.
    Run {
        /// Also write a JSONL event log to this path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Run identifier stamped on every log line.
        #[arg(long, default_value = "local")]
        run_id: String,
    },
    /// Validate a JSONL event log written by `run --log`.
    ValidateLog {
        /// Structured JSONL log path.
        #[arg(long)]
        log: PathBuf,
    },
    /// Print one wall/CPU sample from the system clock as JSON.
    Clock,
}

#[derive(Debug, Serialize)]
struct ClockSample {
    wall_seconds: f64,
    cpu_seconds: f64,
    wall_available: bool,
    cpu_available: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run { log, run_id } => {
            let mut builder = Session::builder();
            if let Some(path) = &log {
                builder = builder.log(LogEmitter::to_file(path, &run_id)?);
            }
            let mut session = builder.build();
            let summary = minunit_harness::run_demo(&mut session)?;
            if let Some(path) = &log {
                eprintln!("Wrote event log to {}", path.display());
            }
            Ok(summary.exit_code())
        }
        Command::ValidateLog { log } => {
            let (lines, errors) = validate_log_file(&log)?;
            for error in &errors {
                eprintln!("{error}");
            }
            if errors.is_empty() {
                eprintln!("{}: {lines} lines valid", log.display());
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("{}: {} errors in {lines} lines", log.display(), errors.len());
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Clock => {
            let clock = system_clock();
            let wall_seconds = clock.wall_seconds();
            let cpu_seconds = clock.cpu_seconds();
            let sample = ClockSample {
                wall_seconds,
                cpu_seconds,
                wall_available: !is_failed(wall_seconds),
                cpu_available: !is_failed(cpu_seconds),
            };
            println!("{}", serde_json::to_string_pretty(&sample)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
