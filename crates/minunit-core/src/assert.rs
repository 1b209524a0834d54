//! Assertion evaluators.
//!
//! Every evaluator is a pure comparison returning `Ok(())` on a pass or an
//! [`AssertionError`] whose `Display` is the exact diagnostic text. Nothing
//! here touches session state; [`Session`](crate::Session) wraps these to
//! attach the call site and record the failure.

use std::panic::Location;

use thiserror::Error;

use crate::format::format_significant;

/// Absolute tolerance for floating-point equality.
pub const EPSILON: f64 = 1e-12;

/// Text substituted for an absent string operand.
pub const NULL_TEXT: &str = "<null pointer>";

/// Significant figures used when printing mismatched floats.
#[must_use]
pub fn double_significant_figures() -> usize {
    (1.0 - EPSILON.log10()).round() as usize
}

fn significant(value: &f64) -> String {
    format_significant(*value, double_significant_figures())
}

/// Why an evaluator rejected its operands.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssertionError {
    #[error("{expected} expected but was {actual}")]
    IntMismatch { expected: i64, actual: i64 },

    #[error("{} expected but was {}", significant(.expected), significant(.actual))]
    DoubleMismatch { expected: f64, actual: f64 },

    #[error("'{expected}' expected but was '{actual}'")]
    StrMismatch { expected: String, actual: String },

    /// Outside the caller's tolerance; the message is the caller's.
    #[error("{message}")]
    NotNear {
        expected: i64,
        actual: i64,
        max_error: i64,
        message: String,
    },

    #[error("{message}")]
    BoolMismatch {
        expected: bool,
        actual: bool,
        message: String,
    },

    #[error("{message}")]
    Check { message: String },

    #[error("{message}")]
    Explicit { message: String },
}

impl AssertionError {
    /// Stable evaluator name, used in structured log details.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::IntMismatch { .. } => "int_eq",
            Self::DoubleMismatch { .. } => "double_eq",
            Self::StrMismatch { .. } => "str_eq",
            Self::NotNear { .. } => "near_int",
            Self::BoolMismatch { .. } => "bool_eq",
            Self::Check { .. } => "check",
            Self::Explicit { .. } => "fail",
        }
    }
}

/// A failed assertion together with the source location that issued it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{file}:{line}: {error}")]
pub struct TestFailure {
    pub file: &'static str,
    pub line: u32,
    pub error: AssertionError,
}

impl TestFailure {
    /// Attach the caller's location to `error`.
    #[track_caller]
    #[must_use]
    pub fn new(error: AssertionError) -> Self {
        let location = Location::caller();
        Self::at(location.file(), location.line(), error)
    }

    #[must_use]
    pub fn at(file: &'static str, line: u32, error: AssertionError) -> Self {
        Self { file, line, error }
    }
}

/// Outcome of a test body or hook. `?` on a failing assertion returns early.
pub type TestResult = Result<(), TestFailure>;

/// Passes iff `expected == actual`.
pub fn int_eq(expected: i64, actual: i64) -> Result<(), AssertionError> {
    if expected == actual {
        Ok(())
    } else {
        Err(AssertionError::IntMismatch { expected, actual })
    }
}

/// Passes iff `|expected - actual| <= EPSILON`. NaN operands never pass.
pub fn double_eq(expected: f64, actual: f64) -> Result<(), AssertionError> {
    if (expected - actual).abs() <= EPSILON {
        Ok(())
    } else {
        Err(AssertionError::DoubleMismatch { expected, actual })
    }
}

/// Byte-for-byte string equality, with `None` read as [`NULL_TEXT`].
pub fn str_eq(expected: Option<&str>, actual: Option<&str>) -> Result<(), AssertionError> {
    let expected = expected.unwrap_or(NULL_TEXT);
    let actual = actual.unwrap_or(NULL_TEXT);
    if expected.as_bytes() == actual.as_bytes() {
        Ok(())
    } else {
        Err(AssertionError::StrMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

/// Passes iff `|expected - actual| <= max_error`. A negative `max_error`
/// never passes.
pub fn near_int(
    expected: i64,
    actual: i64,
    max_error: i64,
    message: &str,
) -> Result<(), AssertionError> {
    let within = u64::try_from(max_error).is_ok_and(|max| expected.abs_diff(actual) <= max);
    if within {
        Ok(())
    } else {
        Err(AssertionError::NotNear {
            expected,
            actual,
            max_error,
            message: message.to_string(),
        })
    }
}

/// Integer equality over the 0/1 encodings of two booleans.
pub fn bool_eq(expected: bool, actual: bool, message: &str) -> Result<(), AssertionError> {
    match int_eq(i64::from(expected), i64::from(actual)) {
        Ok(()) => Ok(()),
        Err(_) => Err(AssertionError::BoolMismatch {
            expected,
            actual,
            message: message.to_string(),
        }),
    }
}

/// Passes iff `condition` holds.
pub fn check(condition: bool, message: &str) -> Result<(), AssertionError> {
    if condition {
        Ok(())
    } else {
        Err(AssertionError::Check {
            message: message.to_string(),
        })
    }
}

/// Never passes.
pub fn fail(message: &str) -> Result<(), AssertionError> {
    Err(AssertionError::Explicit {
        message: message.to_string(),
    })
}
