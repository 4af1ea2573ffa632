//! # Monitor Errors
//!
//! Running short of paper or toner is not an error: callers block until the
//! printer can serve them. The variants here cover the states that waiting can
//! never fix, so they are reported instead of parking the caller forever.

use thiserror::Error;

/// Errors raised at the boundary of the printer monitor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MonitorError {
    /// The printer configuration is internally inconsistent.
    #[error("Invalid printer configuration: {0}")]
    InvalidConfig(String),

    /// A job was built with no pages.
    #[error("Job {0} has no pages")]
    EmptyJob(String),

    /// The job asks for more pages than the printer can ever hold at once.
    #[error("Job {job} needs {pages} pages but the printer can supply at most {max}")]
    JobTooLarge { job: String, pages: u32, max: u32 },

    /// A counter would have been driven below zero.
    #[error("Counter underflow: {0}")]
    CounterUnderflow(&'static str),
}
