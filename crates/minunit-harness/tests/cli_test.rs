//! Integration test: the `harness` binary.
//!
//! Run: cargo test -p minunit-harness --test cli_test

use std::path::PathBuf;
use std::process::Command;

fn unique_temp_path(prefix: &str, suffix: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("{prefix}-{}-{nanos}{suffix}", std::process::id()))
}

#[test]
fn run_exits_with_failure_count() {
    let output = Command::new(env!("CARGO_BIN_EXE_harness"))
        .arg("run")
        .output()
        .expect("harness run should execute");

    assert_eq!(output.status.code(), Some(5));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Running \"Test file 1\" suite\n.F\ntest_1 failed:\n\t"));
    assert!(stdout.contains("Running \"Test file 2\" suite\n"));
    assert!(stdout.contains("\n\n6 tests from 2 test suites ran, 5 failures\n"));
    assert!(stdout.contains("\nFinished in "));
    assert!(stdout.ends_with(" seconds (proc)\n\n"));
}

#[test]
fn run_log_passes_validation() {
    let log_path = unique_temp_path("minunit-cli-log", ".jsonl");

    let run = Command::new(env!("CARGO_BIN_EXE_harness"))
        .arg("run")
        .arg("--log")
        .arg(&log_path)
        .arg("--run-id")
        .arg("cli-test")
        .output()
        .expect("harness run should execute");
    assert_eq!(run.status.code(), Some(5));

    let content = std::fs::read_to_string(&log_path).expect("log written");
    // 2 x (suite_start + suite_end) + 6 tests + run_report
    assert_eq!(content.lines().count(), 11);
    assert!(content.lines().all(|line| line.contains("\"run_id\":\"cli-test\"")));

    let validate = Command::new(env!("CARGO_BIN_EXE_harness"))
        .arg("validate-log")
        .arg("--log")
        .arg(&log_path)
        .output()
        .expect("harness validate-log should execute");
    assert!(
        validate.status.success(),
        "{}",
        String::from_utf8_lossy(&validate.stderr)
    );

    let _ = std::fs::remove_file(&log_path);
}

#[test]
fn validate_log_rejects_garbage() {
    let log_path = unique_temp_path("minunit-cli-bad", ".jsonl");
    std::fs::write(&log_path, "not json\n{\"event\":\"x\"}\n").expect("write log");

    let output = Command::new(env!("CARGO_BIN_EXE_harness"))
        .arg("validate-log")
        .arg("--log")
        .arg(&log_path)
        .output()
        .expect("harness validate-log should execute");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 1"));
    assert!(stderr.contains("line 2"));

    let _ = std::fs::remove_file(&log_path);
}

#[test]
fn clock_prints_a_json_sample() {
    let output = Command::new(env!("CARGO_BIN_EXE_harness"))
        .arg("clock")
        .output()
        .expect("harness clock should execute");

    assert!(output.status.success());
    let sample: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("clock should emit JSON");
    assert_eq!(sample["wall_available"].as_bool(), Some(true));
    assert!(sample["wall_seconds"].as_f64().is_some_and(|s| s >= 0.0));
}
