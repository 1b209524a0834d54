//! Suite and test execution.
//!
//! A suite body runs exactly once and calls [`Session::run_test`] for each of
//! its tests, in the order it chooses. Each test walks
//! setup → body → teardown, stopping at the first stage that leaves the
//! session in [`TestStatus::Fail`]; that test then counts as exactly one
//! failure no matter how many assertions failed inside it.
//!
//! The runner never interrupts a body. A body that wants to stop on its first
//! failed assertion returns early with `?`; one that ignores the result keeps
//! running and its last failure is the one reported.

use std::fmt;
use std::io::Write;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::assert::TestResult;
use crate::error::Result;
use crate::session::{Session, TestStatus};
use crate::structured_log::{LogEntry, LogLevel, Outcome};

/// Setup or teardown hook shared by every test of a suite.
pub type Hook = Rc<dyn Fn(&mut Session) -> TestResult>;

type TestBody = Box<dyn Fn(&mut Session) -> TestResult>;
type SuiteBody = Box<dyn Fn(&mut Session) -> Result<()>>;

/// Wrap a closure as a [`Hook`].
pub fn hook(f: impl Fn(&mut Session) -> TestResult + 'static) -> Hook {
    Rc::new(f)
}

/// The stage of a test in which its failure was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Setup,
    Body,
    Teardown,
}

impl Stage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Body => "body",
            Self::Teardown => "teardown",
        }
    }
}

/// A named unit of verification logic.
pub struct Test {
    name: String,
    body: TestBody,
}

impl Test {
    pub fn new(name: impl Into<String>, body: impl Fn(&mut Session) -> TestResult + 'static) -> Self {
        Self {
            name: name.into(),
            body: Box::new(body),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Test").field("name", &self.name).finish_non_exhaustive()
    }
}

/// A group of tests registered by a suite body.
pub struct Suite {
    name: Option<String>,
    body: SuiteBody,
}

impl Suite {
    /// A suite that prints a header and trailer around its tests.
    pub fn named(name: impl Into<String>, body: impl Fn(&mut Session) -> Result<()> + 'static) -> Self {
        Self {
            name: Some(name.into()),
            body: Box::new(body),
        }
    }

    /// A suite that runs its tests without header or trailer.
    pub fn anonymous(body: impl Fn(&mut Session) -> Result<()> + 'static) -> Self {
        Self {
            name: None,
            body: Box::new(body),
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Debug for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Build a [`Test`] named after a test function.
///
/// ```
/// use minunit_core::{Session, TestResult, test_case};
///
/// fn test_answer(session: &mut Session) -> TestResult {
///     session.assert_int_eq(42, 6 * 7)
/// }
///
/// assert_eq!(test_case!(test_answer).name(), "test_answer");
/// ```
#[macro_export]
macro_rules! test_case {
    ($body:ident) => {
        $crate::Test::new(stringify!($body), $body)
    };
}

impl Session {
    /// Install the hooks applied around every following test of the running
    /// suite. Either may be absent. They are cleared when the suite ends.
    pub fn configure(&mut self, setup: Option<Hook>, teardown: Option<Hook>) {
        self.setup = setup;
        self.teardown = teardown;
    }

    /// Run a suite body once, counting the suite whether or not it is named.
    ///
    /// Hooks are cleared as soon as the body returns, also when it returns an
    /// error; the error is then propagated without printing the trailer.
    pub fn run_suite(&mut self, suite: &Suite) -> Result<()> {
        if let Some(name) = suite.name() {
            writeln!(self.out, "Running \"{name}\" suite")?;
            self.flush()?;
        }
        self.suites_run = self.suites_run.saturating_add(1);
        self.current_suite = suite.name().map(str::to_string);

        if self.is_logging() {
            let entry = self.suite_entry(LogLevel::Info, "suite_start");
            self.log_entry(entry)?;
        }
        let failures_before = self.failures;

        let outcome = (suite.body)(self);

        self.setup = None;
        self.teardown = None;

        if self.is_logging() {
            let failed = self.failures - failures_before;
            let entry = self
                .suite_entry(LogLevel::Info, "suite_end")
                .with_failures(failed)
                .with_outcome(if failed == 0 { Outcome::Pass } else { Outcome::Fail });
            self.log_entry(entry)?;
        }
        self.current_suite = None;
        outcome?;

        if suite.name().is_some() {
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// Run one test under the current hooks.
    pub fn run_test(&mut self, test: &Test) -> Result<()> {
        write!(self.out, ".")?;
        self.flush()?;

        if self.real_start.is_none() && self.cpu_start.is_none() {
            self.real_start = Some(self.clock.wall_seconds());
            self.cpu_start = Some(self.clock.cpu_seconds());
        }

        self.reset_for_test(test.name());
        let started = Instant::now();

        let failed_stage = self.run_stages(test);
        let recorded = match failed_stage {
            Some(_) => self.record_failure(),
            None => Ok(()),
        };

        let logged = if self.is_logging() {
            let entry = self.test_entry(test, failed_stage, duration_ms(started.elapsed()));
            self.log_entry(entry)
        } else {
            Ok(())
        };

        self.current_test = None;
        recorded?;
        logged?;
        self.flush()
    }

    fn run_stages(&mut self, test: &Test) -> Option<Stage> {
        if let Some(setup) = self.setup.clone() {
            let outcome = setup(self);
            self.absorb(outcome);
        }
        if self.status == TestStatus::Fail {
            return Some(Stage::Setup);
        }

        let outcome = (test.body)(self);
        self.absorb(outcome);
        if self.status == TestStatus::Fail {
            return Some(Stage::Body);
        }

        if let Some(teardown) = self.teardown.clone() {
            let outcome = teardown(self);
            self.absorb(outcome);
        }
        if self.status == TestStatus::Fail {
            return Some(Stage::Teardown);
        }
        None
    }

    /// An `Err` that never went through a session assertion still fails the test.
    fn absorb(&mut self, outcome: TestResult) {
        if let Err(failure) = outcome
            && self.status == TestStatus::Ok
        {
            self.flag_failure(&failure);
        }
    }

    fn suite_entry(&self, level: LogLevel, event: &str) -> LogEntry {
        let mut entry = LogEntry::new("", level, event);
        if let Some(suite) = &self.current_suite {
            entry = entry.with_suite(suite);
        }
        entry
    }

    fn test_entry(&self, test: &Test, failed_stage: Option<Stage>, duration_ms: u64) -> LogEntry {
        let (level, event, outcome) = match failed_stage {
            None => (LogLevel::Info, "test_pass", Outcome::Pass),
            Some(_) => (LogLevel::Error, "test_fail", Outcome::Fail),
        };
        let mut entry = self
            .suite_entry(level, event)
            .with_test(test.name())
            .with_outcome(outcome)
            .with_duration_ms(duration_ms);
        if let Some(stage) = failed_stage {
            entry = entry
                .with_stage(stage)
                .with_message(self.last_message.clone());
        }
        entry
    }
}

fn duration_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
