//! Response types for the on-call report API.
//!
//! This module defines the error response structures and the mapping from
//! [`ReportError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ReportError> for ApiErrorResponse {
    fn from(error: ReportError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            ReportError::ConfigNotFound { .. }
            | ReportError::ConfigParseError { .. }
            | ReportError::InvalidConfiguration { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            ReportError::PriceNotFound { .. } | ReportError::NoBillableHours { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "PRICING_ERROR",
                    message,
                    "The configured rotation prices cannot be resolved",
                ),
            ),
            ReportError::CalendarNotFound { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "CALENDAR_NOT_FOUND",
                    message,
                    "No holiday calendar is configured for the report year",
                ),
            ),
            ReportError::UserNotFound { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("USER_NOT_FOUND", message),
            ),
            ReportError::InvalidTimestamp { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_TIMESTAMP",
                    message,
                    "Coverage boundaries must be RFC 3339 timestamps",
                ),
            ),
            ReportError::InvalidPeriod { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_PERIOD", message),
            ),
            ReportError::CalculationError { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}
