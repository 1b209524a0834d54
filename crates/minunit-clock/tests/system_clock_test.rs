//! Integration test: the build target's clock backend.
//!
//! Run: cargo test -p minunit-clock --test system_clock_test

use minunit_clock::{Clock, is_failed, system_clock};

fn burn_cpu() -> u64 {
    let mut acc = 0u64;
    for i in 0..5_000_000u64 {
        acc = acc.wrapping_mul(31).wrapping_add(i ^ (acc >> 7));
    }
    acc
}

#[test]
fn system_wall_clock_is_monotonic() {
    let clock = system_clock();
    let mut last = clock.wall_seconds();
    assert!(!is_failed(last));
    for _ in 0..1_000 {
        let now = clock.wall_seconds();
        assert!(now >= last, "wall clock went backwards: {now} < {last}");
        last = now;
    }
}

#[test]
fn system_wall_clock_measures_sleep() {
    let clock = system_clock();
    let start = clock.wall_seconds();
    std::thread::sleep(std::time::Duration::from_millis(20));
    let elapsed = clock.wall_seconds() - start;
    assert!(elapsed >= 0.015, "elapsed {elapsed} shorter than the sleep");
}

#[test]
fn system_cpu_clock_accumulates_work() {
    let clock = system_clock();
    let start = clock.cpu_seconds();
    assert!(!is_failed(start));
    std::hint::black_box(burn_cpu());
    let end = clock.cpu_seconds();
    assert!(end >= start, "cpu time went backwards: {end} < {start}");
}
