//! Integration test: the bundled suites produce the expected console run.
//!
//! Run: cargo test -p minunit-harness --test e2e_suite_test

use std::rc::Rc;

use minunit_core::clock::ManualClock;
use minunit_core::{CaptureBuffer, Session};
use minunit_harness::demo;

/// Replace each `\t<path>:<line>: ` failure location with `\tdemo.rs: `.
fn normalize(text: &str) -> String {
    text.split_inclusive('\n')
        .map(|line| match line.strip_prefix('\t') {
            Some(rest) => {
                let (_, after_file) = rest.split_once("demo.rs:").expect("failure located in demo.rs");
                let (line_number, message) = after_file.split_once(": ").expect("line number");
                assert!(line_number.parse::<u32>().is_ok(), "bad line number in {line:?}");
                format!("\tdemo.rs: {message}")
            }
            None => line.to_string(),
        })
        .collect()
}

fn session_with(clock: Rc<ManualClock>) -> (Session, CaptureBuffer) {
    let out = CaptureBuffer::new();
    let session = Session::builder().clock(clock).output(out.clone()).build();
    (session, out)
}

const FILE1_OUTPUT: &str = "Running \"Test file 1\" suite\n\
.F\ntest_1 failed:\n\tdemo.rs: 5 not equal to 7\n\
.F\ntest_2 failed:\n\tdemo.rs: 5 expected but was 10\n\
..F\ntest_4 failed:\n\tdemo.rs: 'Hello' expected but was 'World!'\n\
\n";

const FILE2_OUTPUT: &str = "Running \"Test file 2\" suite\n\
.F\ntest_1 failed:\n\tdemo.rs: True and False are not the same\n\
.F\ntest_2 failed:\n\tdemo.rs: Expected = 1234  -  Real = 1230, maximal allowed error = 2\n\
\n";

#[test]
fn file1_alone() {
    let (mut session, out) = session_with(Rc::new(ManualClock::new(0.0, 0.0)));
    session.run_suite(&demo::file1::suite()).unwrap();

    assert_eq!(normalize(&out.contents()), FILE1_OUTPUT);
    assert_eq!(
        (session.tests_run(), session.suites_run(), session.failure_count()),
        (4, 1, 3)
    );
}

#[test]
fn file2_alone() {
    let (mut session, out) = session_with(Rc::new(ManualClock::new(0.0, 0.0)));
    session.run_suite(&demo::file2::suite()).unwrap();

    assert_eq!(normalize(&out.contents()), FILE2_OUTPUT);
    assert_eq!(
        (session.tests_run(), session.suites_run(), session.failure_count()),
        (2, 1, 2)
    );
}

#[test]
fn full_run_reports_totals_and_timing() {
    let clock = Rc::new(ManualClock::new(10.0, 2.0));
    let (mut session, out) = session_with(Rc::clone(&clock));

    for suite in demo::suites() {
        session.run_suite(&suite).unwrap();
    }
    clock.set(11.5, 2.25);
    let summary = session.report().unwrap();

    let expected = format!(
        "{FILE1_OUTPUT}{FILE2_OUTPUT}\
\n\n6 tests from 2 test suites ran, 5 failures\n\
\nFinished in 1.50000000 seconds (real) 0.25000000 seconds (proc)\n\n"
    );
    assert_eq!(normalize(&out.contents()), expected);
    assert_eq!(summary.tests_run, 6);
    assert_eq!(summary.suites_run, 2);
    assert_eq!(summary.failures, 5);
    assert!(!summary.all_passed());
    assert_eq!(summary.exit_status(), 5);
}

#[test]
fn run_demo_matches_manual_run() {
    let (mut session, out) = session_with(Rc::new(ManualClock::new(0.0, 0.0)));
    let summary = minunit_harness::run_demo(&mut session).unwrap();

    assert_eq!(summary.failures, 5);
    assert!(
        normalize(&out.contents())
            .ends_with("6 tests from 2 test suites ran, 5 failures\n\nFinished in 0.00000000 seconds (real) 0.00000000 seconds (proc)\n\n")
    );
}

#[test]
fn failure_lines_point_at_the_failing_assertion() {
    let (mut session, out) = session_with(Rc::new(ManualClock::new(0.0, 0.0)));
    session.run_suite(&demo::file1::suite()).unwrap();

    let lines: Vec<u32> = out
        .contents()
        .lines()
        .filter_map(|line| line.strip_prefix('\t'))
        .map(|rest| {
            let (_, after) = rest.split_once("demo.rs:").unwrap();
            after.split_once(':').unwrap().0.parse().unwrap()
        })
        .collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.windows(2).all(|pair| pair[0] < pair[1]));
}
