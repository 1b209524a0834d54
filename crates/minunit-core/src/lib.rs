//! Minimal test-execution engine.
//!
//! This crate provides:
//! - Suite/test orchestration with per-suite setup and teardown hooks
//! - Assertion evaluators for integers, floats, strings and tolerances
//! - Console progress output (`.`/`F`) and a final timing report
//! - A JSONL structured event log of the run
//!
//! All run state lives in a [`Session`] that is passed by `&mut` to every
//! operation. Time is read through an injected [`minunit_clock::Clock`].
//!
//! ```no_run
//! use minunit_core::{Session, Suite, TestResult, test_case};
//!
//! fn adds_up(session: &mut Session) -> TestResult {
//!     session.assert_int_eq(4, 2 + 2)?;
//!     Ok(())
//! }
//!
//! let mut session = Session::new();
//! let suite = Suite::named("arithmetic", |session| session.run_test(&test_case!(adds_up)));
//! session.run_suite(&suite).expect("console is writable");
//! let summary = session.report().expect("console is writable");
//! std::process::exit(summary.exit_status());
//! ```

#![forbid(unsafe_code)]

pub mod assert;
pub mod error;
pub mod format;
pub mod output;
pub mod report;
pub mod runner;
pub mod session;
pub mod structured_log;

pub use assert::{AssertionError, TestFailure, TestResult};
pub use error::{Error, Result};
pub use output::CaptureBuffer;
pub use report::RunSummary;
pub use runner::{Hook, Stage, Suite, Test, hook};
pub use session::{Session, SessionBuilder, TestStatus};

pub use minunit_clock as clock;
