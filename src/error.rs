//! Error types for the on-call report engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while building a report.

use thiserror::Error;

use crate::models::DayCategory;

/// The main error type for the on-call report engine.
///
/// Every fallible operation in the crate returns this error type. Only
/// [`ReportError::UserNotFound`] is recoverable: the aggregator skips the
/// user and carries on. Everything else aborts the report.
///
/// # Example
///
/// ```
/// use oncall_report::error::ReportError;
///
/// let error = ReportError::ConfigNotFound {
///     path: "/missing/report.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/report.yaml");
/// ```
#[derive(Debug, Error)]
pub enum ReportError {
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

    /// Configuration values are structurally invalid.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// A description of the invalid value.
        message: String,
    },

    /// No daily price is configured for a day category.
    #[error("Price not found for day '{category}'")]
    PriceNotFound {
        /// The category without a price.
        category: DayCategory,
    },

    /// The excluded window of a day category leaves no billable hours.
    #[error("Day '{category}' has no billable hours ({excluded_hours}h excluded)")]
    NoBillableHours {
        /// The category whose window covers the whole day.
        category: DayCategory,
        /// The width of the configured excluded window.
        excluded_hours: u32,
    },

    /// A user's holiday calendar is not available for the report year.
    #[error("Calendar '{calendar}' not found for user '{user_id}'. Aborting")]
    CalendarNotFound {
        /// The resolved calendar key (`<name>-<year>`).
        calendar: String,
        /// The user the calendar was resolved for.
        user_id: String,
    },

    /// A user present in the coverage data has no rotation configuration.
    #[error("Rotation user not found: {user_id}")]
    UserNotFound {
        /// The unknown user id.
        user_id: String,
    },

    /// A coverage boundary could not be parsed.
    #[error("Invalid timestamp '{value}' in schedule '{schedule_id}': {message}")]
    InvalidTimestamp {
        /// The schedule containing the bad entry.
        schedule_id: String,
        /// The raw timestamp text.
        value: String,
        /// A description of the parse error.
        message: String,
    },

    /// A coverage period is inconsistent.
    #[error("Invalid coverage period in schedule '{schedule_id}': {message}")]
    InvalidPeriod {
        /// The schedule containing the bad entry.
        schedule_id: String,
        /// A description of what made the period invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl ReportError {
    /// Returns true for errors that only invalidate a single user's contribution.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ReportError::UserNotFound { .. })
    }
}

/// A type alias for Results that return ReportError.
pub type ReportResult<T> = Result<T, ReportError>;
