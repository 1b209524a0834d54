//! Example client of the minunit engine.
//!
//! This crate provides:
//! - [`demo`]: two small suites exercising every evaluator, most of them
//!   failing on purpose so the console protocol can be inspected
//! - [`run_demo`]: runs both suites on a session and prints the report
//! - the `harness` binary wrapping the above in a CLI

#![forbid(unsafe_code)]

pub mod demo;

use minunit_core::{RunSummary, Session};

/// Run the bundled suites in order and print the final report.
pub fn run_demo(session: &mut Session) -> minunit_core::Result<RunSummary> {
    for suite in demo::suites() {
        session.run_suite(&suite)?;
    }
    session.report()
}
