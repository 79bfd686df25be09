//! Recap error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Recap aggregation and projection errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecapError {
    /// No assignees supplied.
    #[error("no assignees provided")]
    EmptyAssignees,

    /// A date range is inverted.
    #[error("{label} date range is inverted: {start} is after {end}")]
    InvalidDateRange {
        /// Which range failed ("assignment" or "travel").
        label: &'static str,
        /// Range start.
        start: NaiveDate,
        /// Range end.
        end: NaiveDate,
    },
}
