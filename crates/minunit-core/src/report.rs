//! Final run report.

use std::io::Write;
use std::process::ExitCode;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::Session;
use crate::structured_log::{LogEntry, LogLevel, Outcome};

/// Counts and timings printed at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Tests started.
    pub tests_run: u32,
    /// `run_suite` calls, named or not.
    pub suites_run: u32,
    /// Tests that ended in failure.
    pub failures: u32,
    /// Wall seconds since the first test started.
    pub real_elapsed: f64,
    /// Process-CPU seconds since the first test started.
    pub cpu_elapsed: f64,
}

impl RunSummary {
    /// Returns true if no test failed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failures == 0
    }

    /// The failure count as a process status, saturating at `i32::MAX`.
    #[must_use]
    pub fn exit_status(&self) -> i32 {
        i32::try_from(self.failures).unwrap_or(i32::MAX)
    }

    /// `SUCCESS` with no failures, otherwise the failure count clamped to 1..=255.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        exit_code_for(self.failures)
    }
}

fn exit_code_for(failures: u32) -> ExitCode {
    ExitCode::from(u8::try_from(failures).unwrap_or(u8::MAX))
}

impl Session {
    /// Print the totals and the elapsed wall/CPU time since the first test.
    ///
    /// A run without tests never sampled its start, so it measures from zero.
    pub fn report(&mut self) -> Result<RunSummary> {
        write!(
            self.out,
            "\n\n{} tests from {} test suites ran, {} failures\n",
            self.tests_run, self.suites_run, self.failures
        )?;

        let real_end = self.clock.wall_seconds();
        let cpu_end = self.clock.cpu_seconds();
        let summary = RunSummary {
            tests_run: self.tests_run,
            suites_run: self.suites_run,
            failures: self.failures,
            real_elapsed: real_end - self.real_start.unwrap_or(0.0),
            cpu_elapsed: cpu_end - self.cpu_start.unwrap_or(0.0),
        };

        write!(
            self.out,
            "\nFinished in {:.8} seconds (real) {:.8} seconds (proc)\n\n",
            summary.real_elapsed, summary.cpu_elapsed
        )?;
        self.flush()?;

        if self.is_logging() {
            let outcome = if summary.all_passed() {
                Outcome::Pass
            } else {
                Outcome::Fail
            };
            let entry = LogEntry::new("", LogLevel::Info, "run_report")
                .with_outcome(outcome)
                .with_failures(summary.failures)
                .with_details(serde_json::json!({
                    "tests_run": summary.tests_run,
                    "suites_run": summary.suites_run,
                    "real_elapsed": summary.real_elapsed,
                    "cpu_elapsed": summary.cpu_elapsed,
                }));
            self.log_entry(entry)?;
            self.flush_log()?;
        }
        Ok(summary)
    }

    /// Process exit code for the run so far.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        exit_code_for(self.failures)
    }
}
