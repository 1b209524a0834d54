//! Bundled example suites.
//!
//! `file1` runs four tests of which three fail; `file2` runs two failing
//! tests. Together: 6 tests, 2 suites, 5 failures.

use minunit_core::Suite;

pub mod file1 {
    use minunit_core::{Session, Suite, TestResult, test_case};

    pub fn test_1(session: &mut Session) -> TestResult {
        session.check(5 == 7, "5 not equal to 7")
    }

    pub fn test_2(session: &mut Session) -> TestResult {
        session.assert_int_eq(5, 10)?;
        session.assert_str_eq(Some("Hello"), Some("World!"))
    }

    pub fn test_3(session: &mut Session) -> TestResult {
        session.assert_str_eq(Some("Equal str"), Some("Equal str"))
    }

    pub fn test_4(session: &mut Session) -> TestResult {
        session.assert_str_eq(Some("Hello"), Some("World!"))
    }

    pub fn suite() -> Suite {
        Suite::named("Test file 1", |session| {
            session.run_test(&test_case!(test_1))?;
            session.run_test(&test_case!(test_2))?;
            session.run_test(&test_case!(test_3))?;
            session.run_test(&test_case!(test_4))
        })
    }
}

pub mod file2 {
    use minunit_core::{Session, Suite, TestResult, test_case};

    pub fn test_1(session: &mut Session) -> TestResult {
        session.assert_bool_eq(false, true, "True and False are not the same")
    }

    pub fn test_2(session: &mut Session) -> TestResult {
        let expected = 1234;
        let real = 1230;
        let max_allowed_abs_err = 2;
        let message = format!(
            "Expected = {expected}  -  Real = {real}, maximal allowed error = {max_allowed_abs_err}"
        );
        session.assert_near_int(expected, real, max_allowed_abs_err, &message)
    }

    pub fn suite() -> Suite {
        Suite::named("Test file 2", |session| {
            session.run_test(&test_case!(test_1))?;
            session.run_test(&test_case!(test_2))
        })
    }
}

/// Both suites in run order.
#[must_use]
pub fn suites() -> Vec<Suite> {
    vec![file1::suite(), file2::suite()]
}
