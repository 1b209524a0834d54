//! POSIX time source.
//!
//! Syscalls are invoked via `libc`. Each reading walks an ordered list of
//! primitives, highest resolution first, and reports [`CLOCK_FAILED`] only
//! when all of them fail.

use crate::{CLOCK_FAILED, Clock};

/// XSI fixes `CLOCKS_PER_SEC` at one million.
const CLOCKS_PER_SEC: f64 = 1_000_000.0;

const NANOS_PER_SEC: f64 = 1_000_000_000.0;
const MICROS_PER_SEC: f64 = 1_000_000.0;

#[cfg(any(target_os = "linux", target_os = "android"))]
const MONOTONIC_CLOCK_ID: libc::clockid_t = libc::CLOCK_MONOTONIC_RAW;
#[cfg(not(any(target_os = "linux", target_os = "android")))]
const MONOTONIC_CLOCK_ID: libc::clockid_t = libc::CLOCK_MONOTONIC;

/// A single time primitive; `None` means the call failed.
pub(crate) type Source = fn() -> Option<f64>;

pub(crate) const WALL_SOURCES: &[Source] = &[monotonic_seconds, gettimeofday_seconds];

pub(crate) const CPU_SOURCES: &[Source] = &[
    process_cputime_seconds,
    rusage_seconds,
    times_seconds,
    clock_seconds,
];

/// `clock_gettime`-backed clock with `gettimeofday`/`getrusage`/`times`/`clock`
/// fallbacks.
#[derive(Debug, Default, Clone, Copy)]
pub struct PosixClock;

impl PosixClock {
    /// Create a new POSIX clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for PosixClock {
    fn wall_seconds(&self) -> f64 {
        first_reading(WALL_SOURCES)
    }

    fn cpu_seconds(&self) -> f64 {
        first_reading(CPU_SOURCES)
    }
}

/// Value of the first source that succeeds, or [`CLOCK_FAILED`].
pub(crate) fn first_reading(sources: &[Source]) -> f64 {
    sources
        .iter()
        .find_map(|source| source())
        .unwrap_or(CLOCK_FAILED)
}

fn clock_gettime_seconds(clock_id: libc::clockid_t) -> Option<f64> {
    let mut ts: libc::timespec = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::clock_gettime(clock_id, &mut ts) };
    if rc != 0 {
        return None;
    }
    Some(ts.tv_sec as f64 + ts.tv_nsec as f64 / NANOS_PER_SEC)
}

pub(crate) fn monotonic_seconds() -> Option<f64> {
    clock_gettime_seconds(MONOTONIC_CLOCK_ID)
}

pub(crate) fn gettimeofday_seconds() -> Option<f64> {
    let mut tv: libc::timeval = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::gettimeofday(&mut tv, std::ptr::null_mut()) };
    if rc != 0 {
        return None;
    }
    Some(tv.tv_sec as f64 + tv.tv_usec as f64 / MICROS_PER_SEC)
}

#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "freebsd"
))]
pub(crate) fn process_cputime_seconds() -> Option<f64> {
    clock_gettime_seconds(libc::CLOCK_PROCESS_CPUTIME_ID)
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "freebsd"
)))]
pub(crate) fn process_cputime_seconds() -> Option<f64> {
    None
}

/// User CPU time from `getrusage(RUSAGE_SELF)`.
pub(crate) fn rusage_seconds() -> Option<f64> {
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) };
    if rc != 0 {
        return None;
    }
    Some(usage.ru_utime.tv_sec as f64 + usage.ru_utime.tv_usec as f64 / MICROS_PER_SEC)
}

/// User CPU ticks from `times()`, scaled by `_SC_CLK_TCK`.
pub(crate) fn times_seconds() -> Option<f64> {
    let ticks_per_sec = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if ticks_per_sec <= 0 {
        return None;
    }
    let mut tms: libc::tms = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::times(&mut tms) };
    if rc == -1i64 as libc::clock_t {
        return None;
    }
    Some(tms.tms_utime as f64 / ticks_per_sec as f64)
}

// `libc` binds `clock` only for non-unix targets.
unsafe extern "C" {
    fn clock() -> libc::clock_t;
}

/// Process CPU ticks from ISO C `clock()`.
pub(crate) fn clock_seconds() -> Option<f64> {
    let ticks = unsafe { clock() };
    if ticks == -1i64 as libc::clock_t {
        return None;
    }
    Some(ticks as f64 / CLOCKS_PER_SEC)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable() -> Option<f64> {
        None
    }

    fn fixed_two() -> Option<f64> {
        Some(2.0)
    }

    fn fixed_nine() -> Option<f64> {
        Some(9.0)
    }

    #[test]
    fn first_successful_source_wins() {
        assert_eq!(first_reading(&[unavailable, fixed_two, fixed_nine]), 2.0);
        assert_eq!(first_reading(&[fixed_nine, fixed_two]), 9.0);
    }

    #[test]
    fn all_sources_failing_yields_sentinel() {
        assert_eq!(first_reading(&[unavailable, unavailable]), CLOCK_FAILED);
        assert_eq!(first_reading(&[]), CLOCK_FAILED);
    }

    #[test]
    fn wall_primitives_are_available() {
        assert!(monotonic_seconds().is_some());
        assert!(gettimeofday_seconds().is_some_and(|secs| secs > 0.0));
    }

    #[test]
    fn cpu_fallbacks_are_available() {
        assert!(rusage_seconds().is_some_and(|secs| secs >= 0.0));
        assert!(times_seconds().is_some_and(|secs| secs >= 0.0));
        assert!(clock_seconds().is_some_and(|secs| secs >= 0.0));
    }

    #[test]
    fn iso_clock_ticks_accumulate() {
        let before = clock_seconds().expect("clock() available");
        let mut acc = 0u64;
        for i in 0..2_000_000u64 {
            acc = acc.wrapping_mul(31).wrapping_add(i);
        }
        std::hint::black_box(acc);
        let after = clock_seconds().expect("clock() available");
        assert!(after >= before);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn process_cputime_is_preferred_on_linux() {
        assert!(process_cputime_seconds().is_some());
        let clock = PosixClock::new();
        assert!(clock.cpu_seconds() >= 0.0);
    }

    #[test]
    fn wall_readings_never_go_backwards() {
        let clock = PosixClock::new();
        let first = clock.wall_seconds();
        let second = clock.wall_seconds();
        assert!(first >= 0.0);
        assert!(second >= first);
    }
}
