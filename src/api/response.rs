//! Response types for the maintenance planner API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API, plus the `/jobs` response body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::models::Job;

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

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
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

impl ApiErrorResponse {
    fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PlannerError> for ApiErrorResponse {
    fn from(error: PlannerError) -> Self {
        let message = error.to_string();
        match error {
            PlannerError::ConfigNotFound { .. } | PlannerError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "CONFIG_ERROR",
                        "Configuration error",
                        message,
                    ),
                }
            }
            PlannerError::InvalidConfig { field, .. } => {
                Self::bad_request(ApiError::with_details(
                    "INVALID_CONFIG",
                    message,
                    format!("Check the '{}' value of the request configuration", field),
                ))
            }
            PlannerError::InputRead { .. }
            | PlannerError::UnsupportedFormat { .. }
            | PlannerError::MissingColumn { .. } => {
                Self::bad_request(ApiError::new("INPUT_ERROR", message))
            }
            PlannerError::InvalidDateRange { .. } => Self::bad_request(ApiError::with_details(
                "INVALID_DATE_RANGE",
                message,
                "end_date must not be before start_date",
            )),
            PlannerError::MissingHorizon => Self::bad_request(ApiError::with_details(
                "MISSING_HORIZON",
                message,
                "Provide start_date and end_date, or give every row a period",
            )),
            PlannerError::MixedPeriods => {
                Self::bad_request(ApiError::new("MIXED_PERIODS", message))
            }
            PlannerError::Export { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("EXPORT_ERROR", "Export failed", message),
            },
        }
    }
}

/// Response body for the `/jobs` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsResponse {
    /// One job per site (or per site and month), in first-appearance order.
    pub jobs: Vec<Job>,
    /// Sum of equipment counts across jobs.
    pub total_equipment: f64,
    /// Sum of required hours, rounded to 2 decimal places.
    pub required_hours: Decimal,
}
