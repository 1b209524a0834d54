//! Time sources for the minunit engine.
//!
//! The engine only ever talks to the [`Clock`] trait. Exactly one concrete
//! backend is selected per target through [`SystemClock`]:
//! - unix: [`PosixClock`], `clock_gettime` with lower-resolution fallbacks
//! - windows: [`WindowsClock`], performance counter and `GetProcessTimes`
//!
//! Targets with neither fail to build.
//!
//! Readings are plain seconds as `f64`. Only differences between two readings
//! of the same kind are meaningful. A reading of [`CLOCK_FAILED`] means every
//! primitive the backend tried was unavailable.

use std::rc::Rc;

mod manual;
#[cfg(unix)]
mod posix;
#[cfg(windows)]
mod windows;

pub use manual::ManualClock;
#[cfg(unix)]
pub use posix::PosixClock;
#[cfg(windows)]
pub use windows::WindowsClock;

#[cfg(not(any(unix, windows)))]
compile_error!("minunit-clock: no timer backend is available for this target");

/// Sentinel returned by a [`Clock`] reading when the platform offers no
/// usable primitive.
pub const CLOCK_FAILED: f64 = -1.0;

/// A source of wall-clock and process-CPU time.
pub trait Clock {
    /// Monotonic wall time in seconds since an arbitrary epoch.
    fn wall_seconds(&self) -> f64;

    /// CPU time consumed by the current process, in seconds.
    fn cpu_seconds(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn wall_seconds(&self) -> f64 {
        (**self).wall_seconds()
    }

    fn cpu_seconds(&self) -> f64 {
        (**self).cpu_seconds()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn wall_seconds(&self) -> f64 {
        (**self).wall_seconds()
    }

    fn cpu_seconds(&self) -> f64 {
        (**self).cpu_seconds()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn wall_seconds(&self) -> f64 {
        (**self).wall_seconds()
    }

    fn cpu_seconds(&self) -> f64 {
        (**self).cpu_seconds()
    }
}

/// The backend for the build target.
#[cfg(unix)]
pub type SystemClock = PosixClock;

/// The backend for the build target.
#[cfg(all(windows, not(unix)))]
pub type SystemClock = WindowsClock;

/// Construct the backend for the build target.
#[must_use]
pub fn system_clock() -> SystemClock {
    SystemClock::default()
}

/// Returns `true` if `reading` is the failure sentinel.
#[inline]
#[must_use]
pub fn is_failed(reading: f64) -> bool {
    reading == CLOCK_FAILED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwarding_impls_reach_the_inner_clock() {
        let clock = ManualClock::new(3.0, 1.5);
        let by_ref: &dyn Clock = &clock;
        assert_eq!(by_ref.wall_seconds(), 3.0);

        let boxed: Box<dyn Clock> = Box::new(ManualClock::new(7.0, 2.0));
        assert_eq!(boxed.cpu_seconds(), 2.0);

        let shared = Rc::new(ManualClock::new(4.0, 0.25));
        let handle = Rc::clone(&shared);
        assert_eq!(handle.wall_seconds(), 4.0);
        assert_eq!(shared.cpu_seconds(), 0.25);
    }

    #[test]
    fn sentinel_detection() {
        assert!(is_failed(CLOCK_FAILED));
        assert!(!is_failed(0.0));
        assert!(!is_failed(12.5));
    }
}
