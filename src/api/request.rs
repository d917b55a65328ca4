//! Request types for the on-call report API.
//!
//! This module defines the JSON request structures for the `/report` endpoint.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};
use crate::models::{ReportWindow, ScheduleCoverage};

/// Request body for the `/report` endpoint.
///
/// Carries the billing period and the coverage of every schedule to report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// The billing period.
    pub period: ReportPeriodRequest,
    /// Coverage per schedule, in the order they should be reported.
    #[serde(default)]
    pub schedules: Vec<ScheduleCoverage>,
}

/// The billing period of a report request.
///
/// Either a calendar month, extended by the configured rotation boundary,
/// or an explicit window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportPeriodRequest {
    /// A calendar month.
    Month {
        /// The year.
        year: i32,
        /// The month, 1 to 12.
        month: u32,
    },
    /// An explicit window in schedule-local time.
    Range {
        /// Start of the window (inclusive).
        start: NaiveDateTime,
        /// End of the window (exclusive).
        end: NaiveDateTime,
    },
}

impl ReportPeriodRequest {
    /// Resolves the period into a report window.
    pub fn window(&self, boundary_hour: u32) -> ReportResult<ReportWindow> {
        match *self {
            ReportPeriodRequest::Month { year, month } => {
                ReportWindow::for_month(year, month, boundary_hour)
            }
            ReportPeriodRequest::Range { start, end } => {
                if end <= start {
                    return Err(ReportError::CalculationError {
                        message: format!("Report window ends ({}) before it starts ({})", end, start),
                    });
                }
                Ok(ReportWindow { start, end })
            }
        }
    }
}
