//! Win32 time source.
//!
//! Wall time comes from the performance counter, process CPU time from
//! `GetProcessTimes`. Both are reached through `windows-sys`.

use windows_sys::Win32::Foundation::FILETIME;
use windows_sys::Win32::System::Performance::{QueryPerformanceCounter, QueryPerformanceFrequency};
use windows_sys::Win32::System::Threading::{GetCurrentProcess, GetProcessTimes};

use crate::{CLOCK_FAILED, Clock};

/// `FILETIME` counts 100-nanosecond intervals.
const FILETIME_TICKS_PER_SEC: f64 = 10_000_000.0;

/// Performance-counter wall clock with `GetProcessTimes` user CPU time.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsClock;

impl WindowsClock {
    /// Create a new Win32 clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for WindowsClock {
    fn wall_seconds(&self) -> f64 {
        performance_counter_seconds().unwrap_or(CLOCK_FAILED)
    }

    fn cpu_seconds(&self) -> f64 {
        process_user_seconds().unwrap_or(CLOCK_FAILED)
    }
}

fn performance_counter_seconds() -> Option<f64> {
    let mut frequency = 0i64;
    let mut counter = 0i64;
    if unsafe { QueryPerformanceFrequency(&mut frequency) } == 0 || frequency <= 0 {
        return None;
    }
    if unsafe { QueryPerformanceCounter(&mut counter) } == 0 {
        return None;
    }
    Some(counter as f64 / frequency as f64)
}

fn filetime_ticks(ft: FILETIME) -> u64 {
    (u64::from(ft.dwHighDateTime) << 32) | u64::from(ft.dwLowDateTime)
}

/// User-mode CPU time of the current process; 1/64 s resolution on most hosts.
fn process_user_seconds() -> Option<f64> {
    let empty = FILETIME {
        dwLowDateTime: 0,
        dwHighDateTime: 0,
    };
    let (mut creation, mut exit, mut kernel, mut user) = (empty, empty, empty, empty);
    let ok = unsafe {
        GetProcessTimes(
            GetCurrentProcess(),
            &mut creation,
            &mut exit,
            &mut kernel,
            &mut user,
        )
    };
    if ok == 0 {
        return None;
    }
    Some(filetime_ticks(user) as f64 / FILETIME_TICKS_PER_SEC)
}
