//! Error types for the maintenance planner.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that aborts a planning run. Recoverable data issues
//! (unparseable equipment counts or periods) and scheduling exhaustion
//! (leftover hours) are not errors and never appear here.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the maintenance planner.
///
/// # Example
///
/// ```
/// use maintenance_planner::error::PlannerError;
///
/// let error = PlannerError::MissingColumn {
///     column: "Description site".to_string(),
/// };
/// assert_eq!(error.to_string(), "Required column not found: Description site");
/// ```
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value is out of range.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The input table could not be read.
    #[error("Failed to read input '{path}': {message}")]
    InputRead {
        /// The input path.
        path: String,
        /// A description of the read failure.
        message: String,
    },

    /// The input file extension is not a supported tabular format.
    #[error("Unsupported input format: {path}")]
    UnsupportedFormat {
        /// The input path.
        path: String,
    },

    /// A column requested by the caller is absent from the input table.
    #[error("Required column not found: {column}")]
    MissingColumn {
        /// The requested column header.
        column: String,
    },

    /// The requested horizon ends before it starts.
    #[error("Invalid date range: {end} is before {start}")]
    InvalidDateRange {
        /// First day of the requested horizon.
        start: NaiveDate,
        /// Last day of the requested horizon.
        end: NaiveDate,
    },

    /// No horizon was given and none can be derived from the jobs.
    #[error("No planning horizon: supply start and end dates or period-tagged jobs")]
    MissingHorizon,

    /// Some jobs carry a period and others do not.
    #[error("Jobs mix period-scoped and unscoped work; either all or none must carry a period")]
    MixedPeriods,

    /// Writing the schedule out failed.
    #[error("Export failed: {message}")]
    Export {
        /// A description of the write failure.
        message: String,
    },
}

/// A type alias for Results that return PlannerError.
pub type PlannerResult<T> = Result<T, PlannerError>;

impl From<csv::Error> for PlannerError {
    fn from(error: csv::Error) -> Self {
        PlannerError::Export {
            message: error.to_string(),
        }
    }
}
