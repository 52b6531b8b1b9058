//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only configuration loading, identity lookups, store writes and file I/O
//! can fail; the pay calculations themselves are total functions.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound { employee_id: 10042 };
/// assert_eq!(error.to_string(), "Employee not found: 10042");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// Configuration parsed but violates an invariant (e.g. discontinuous tax brackets).
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the violated invariant.
        message: String,
    },

    /// No employee profile exists for the given id.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        employee_id: u32,
    },

    /// An employee with the given id already exists.
    #[error("Employee already exists: {employee_id}")]
    DuplicateEmployee {
        /// The clashing id.
        employee_id: u32,
    },

    /// No attendance record exists for the employee on the given date.
    #[error("Attendance record not found for employee {employee_id} on {date}")]
    AttendanceNotFound {
        /// The employee id.
        employee_id: u32,
        /// The date of the missing record.
        date: NaiveDate,
    },

    /// Caller-supplied input was rejected at a boundary.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// Why it was rejected.
        message: String,
    },

    /// Reading or writing a backing file failed.
    #[error("Data access error on '{path}': {message}")]
    DataAccess {
        /// The file involved.
        path: String,
        /// The underlying failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
