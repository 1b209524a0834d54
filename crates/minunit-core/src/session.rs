//! Run state shared by every engine operation.
//!
//! A [`Session`] owns the counters, the per-test status, the last failure
//! message, the lazily sampled timer start points, the active hooks and the
//! output sinks. It is created per run and passed by `&mut`; nothing in the
//! engine is global, so independent sessions can coexist in one process.

use std::fmt;
use std::io::Write;

use minunit_clock::Clock;

use crate::assert::{self, AssertionError, TestFailure, TestResult};
use crate::error::{Error, Result};
use crate::runner::Hook;
use crate::structured_log::{LogEmitter, LogEntry};

/// Pass/fail flag of the test currently running.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    #[default]
    Ok,
    Fail,
}

/// Process-independent run context.
pub struct Session {
    pub(crate) tests_run: u32,
    pub(crate) suites_run: u32,
    pub(crate) failures: u32,
    pub(crate) status: TestStatus,
    pub(crate) last_message: String,
    pub(crate) real_start: Option<f64>,
    pub(crate) cpu_start: Option<f64>,
    pub(crate) setup: Option<Hook>,
    pub(crate) teardown: Option<Hook>,
    pub(crate) current_suite: Option<String>,
    pub(crate) current_test: Option<String>,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) out: Box<dyn Write>,
    pub(crate) log: Option<LogEmitter>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("tests_run", &self.tests_run)
            .field("suites_run", &self.suites_run)
            .field("failures", &self.failures)
            .field("status", &self.status)
            .field("last_message", &self.last_message)
            .field("real_start", &self.real_start)
            .field("cpu_start", &self.cpu_start)
            .field("has_setup", &self.setup.is_some())
            .field("has_teardown", &self.teardown.is_some())
            .field("current_suite", &self.current_suite)
            .field("current_test", &self.current_test)
            .finish_non_exhaustive()
    }
}

/// Configures the clock, console sink and event log of a [`Session`].
#[derive(Default)]
pub struct SessionBuilder {
    clock: Option<Box<dyn Clock>>,
    out: Option<Box<dyn Write>>,
    log: Option<LogEmitter>,
}

impl SessionBuilder {
    /// Time source for the report. Defaults to the target's system clock.
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Console sink for progress and report text. Defaults to stdout.
    #[must_use]
    pub fn output(mut self, out: impl Write + 'static) -> Self {
        self.out = Some(Box::new(out));
        self
    }

    /// Attach a structured event log.
    #[must_use]
    pub fn log(mut self, emitter: LogEmitter) -> Self {
        self.log = Some(emitter);
        self
    }

    #[must_use]
    pub fn build(self) -> Session {
        Session {
            tests_run: 0,
            suites_run: 0,
            failures: 0,
            status: TestStatus::Ok,
            last_message: String::new(),
            real_start: None,
            cpu_start: None,
            setup: None,
            teardown: None,
            current_suite: None,
            current_test: None,
            clock: self
                .clock
                .unwrap_or_else(|| Box::new(minunit_clock::system_clock())),
            out: self.out.unwrap_or_else(|| Box::new(std::io::stdout())),
            log: self.log,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session on the system clock writing to stdout.
    #[must_use]
    pub fn new() -> Self {
        SessionBuilder::default().build()
    }

    #[must_use]
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    #[must_use]
    pub fn tests_run(&self) -> u32 {
        self.tests_run
    }

    #[must_use]
    pub fn suites_run(&self) -> u32 {
        self.suites_run
    }

    #[must_use]
    pub fn failure_count(&self) -> u32 {
        self.failures
    }

    #[must_use]
    pub fn status(&self) -> TestStatus {
        self.status
    }

    /// Formatted text of the most recent failure; earlier ones are overwritten.
    #[must_use]
    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    /// Wall and CPU readings taken when the first test of the run started.
    #[must_use]
    pub fn timer_start(&self) -> Option<(f64, f64)> {
        self.real_start.zip(self.cpu_start)
    }

    #[must_use]
    pub fn current_test(&self) -> Option<&str> {
        self.current_test.as_deref()
    }

    #[must_use]
    pub fn current_suite(&self) -> Option<&str> {
        self.current_suite.as_deref()
    }

    /// Begin a new test: status back to `Ok`, one more test counted.
    pub fn reset_for_test(&mut self, name: &str) {
        self.status = TestStatus::Ok;
        self.tests_run = self.tests_run.saturating_add(1);
        self.current_test = Some(name.to_string());
    }

    /// Mark the running test failed and overwrite the last message.
    ///
    /// Counters are untouched; the runner counts at most one failure per test
    /// through [`Session::record_failure`].
    pub fn flag_failure(&mut self, failure: &TestFailure) {
        let test = self.current_test.as_deref().unwrap_or("<outside test>");
        self.last_message = format!("{test} failed:\n\t{failure}");
        self.status = TestStatus::Fail;
    }

    /// Count one failed test and print the `F` marker with the last message.
    pub fn record_failure(&mut self) -> Result<()> {
        self.failures = self.failures.saturating_add(1);
        write!(self.out, "F\n{}\n", self.last_message)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    #[track_caller]
    fn verdict(&mut self, result: Result<(), AssertionError>) -> TestResult {
        match result {
            Ok(()) => Ok(()),
            Err(error) => {
                let failure = TestFailure::new(error);
                self.flag_failure(&failure);
                Err(failure)
            }
        }
    }

    /// Fails with `message` unless `condition` holds.
    #[track_caller]
    pub fn check(&mut self, condition: bool, message: &str) -> TestResult {
        self.verdict(assert::check(condition, message))
    }

    /// Fails unconditionally with `message`.
    #[track_caller]
    pub fn fail(&mut self, message: &str) -> TestResult {
        self.verdict(assert::fail(message))
    }

    #[track_caller]
    pub fn assert_int_eq(&mut self, expected: i64, actual: i64) -> TestResult {
        self.verdict(assert::int_eq(expected, actual))
    }

    /// Equal within [`EPSILON`](crate::assert::EPSILON).
    #[track_caller]
    pub fn assert_double_eq(&mut self, expected: f64, actual: f64) -> TestResult {
        self.verdict(assert::double_eq(expected, actual))
    }

    #[track_caller]
    pub fn assert_str_eq(&mut self, expected: Option<&str>, actual: Option<&str>) -> TestResult {
        self.verdict(assert::str_eq(expected, actual))
    }

    #[track_caller]
    pub fn assert_near_int(
        &mut self,
        expected: i64,
        actual: i64,
        max_error: i64,
        message: &str,
    ) -> TestResult {
        self.verdict(assert::near_int(expected, actual, max_error, message))
    }

    #[track_caller]
    pub fn assert_bool_eq(&mut self, expected: bool, actual: bool, message: &str) -> TestResult {
        self.verdict(assert::bool_eq(expected, actual, message))
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    pub(crate) fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub(crate) fn log_entry(&mut self, entry: LogEntry) -> Result<()> {
        match self.log.as_mut() {
            Some(emitter) => emitter.emit_entry(entry).map_err(Error::Log),
            None => Ok(()),
        }
    }

    /// Whether a structured event log is attached.
    #[must_use]
    pub fn is_logging(&self) -> bool {
        self.log.is_some()
    }

    /// Flush the structured event log, if any.
    pub fn flush_log(&mut self) -> Result<()> {
        match self.log.as_mut() {
            Some(emitter) => emitter.flush().map_err(Error::Log),
            None => Ok(()),
        }
    }
}
