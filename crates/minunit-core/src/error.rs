//! Engine-level errors.
//!
//! Assertion failures are not errors in this sense: they are recorded on the
//! [`Session`](crate::Session) and the run continues. These variants cover the
//! environment failing underneath the engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Writing progress or report text to the console sink failed.
    #[error("console output: {0}")]
    Output(#[from] std::io::Error),
    /// Writing to the structured event log failed.
    #[error("structured log: {0}")]
    Log(#[source] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
