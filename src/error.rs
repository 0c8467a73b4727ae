//! Error types for the assignment engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing assignments.

use thiserror::Error;

/// The main error type for the assignment engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application. Data
/// quality problems (missing or non-numeric miles and costs) are *not*
/// errors; they degrade to zero-valued cost contributions during
/// annotation. Unresolved customers and unfillable slots are reported as
/// diagnostics on the run report, not as errors.
///
/// # Example
///
/// ```
/// use assignment_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
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

    /// The uploaded job table contained the same job number more than once.
    #[error("Duplicate job number: {job_number}")]
    DuplicateJob {
        /// The job number that appeared more than once.
        job_number: String,
    },

    /// The optimization backend failed for a reason other than infeasibility.
    ///
    /// Infeasibility is a legitimate outcome and is reported through
    /// [`SolveStatus`](crate::models::SolveStatus), never as an error.
    #[error("Assignment solve failed: {message}")]
    Solver {
        /// A description of the solver failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
