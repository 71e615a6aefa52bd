//! HTTP request handlers for the maintenance planner API.
//!
//! This module contains the handler functions for all API endpoints.

use std::borrow::Cow;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{PlannerConfig, validate};
use crate::input::SiteRow;
use crate::models::round_hours;
use crate::planner::{build_site_jobs, plan_maintenance};

use super::request::{JobsRequest, ScheduleRequest, SiteRowRequest};
use super::response::{ApiError, ApiErrorResponse, JobsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/schedule", post(schedule_handler))
        .route("/jobs", post(jobs_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

/// Turns a body rejection into a 400 error.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Picks the request's own configuration if present, otherwise the server's.
fn effective_config(
    state: &AppState,
    requested: Option<PlannerConfig>,
) -> Result<Cow<'_, PlannerConfig>, ApiErrorResponse> {
    match requested {
        Some(config) => {
            validate(&config)?;
            Ok(Cow::Owned(config))
        }
        None => Ok(Cow::Borrowed(state.config())),
    }
}

fn into_rows(rows: Vec<SiteRowRequest>) -> Vec<SiteRow> {
    rows.into_iter().map(Into::into).collect()
}

/// Handler for POST /schedule endpoint.
///
/// Accepts input rows and an optional horizon, and returns the full
/// schedule result.
async fn schedule_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing schedule request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_error(rejection, correlation_id),
            );
        }
    };

    let horizon = match (request.start_date, request.end_date) {
        (Some(start), Some(end)) => Some((start, end)),
        (None, None) => None,
        _ => {
            warn!(correlation_id = %correlation_id, "Half-open horizon rejected");
            return json_response(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error("start_date and end_date must be given together"),
            );
        }
    };

    let config = match effective_config(&state, request.config) {
        Ok(config) => config,
        Err(api_error) => {
            warn!(
                correlation_id = %correlation_id,
                error = %api_error.error.message,
                "Request configuration rejected"
            );
            return error_response(api_error);
        }
    };

    let rows = into_rows(request.rows);
    match plan_maintenance(&rows, horizon, &config) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %result.run_id,
                rows = rows.len(),
                sites = result.totals.sites,
                leftover_hours = %result.totals.leftover_hours,
                duration_us = result.audit_trace.duration_us,
                "Schedule completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Scheduling failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /jobs endpoint.
///
/// Aggregates input rows into the job queue without scheduling it.
async fn jobs_handler(
    State(state): State<AppState>,
    payload: Result<Json<JobsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing jobs request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_error(rejection, correlation_id),
            );
        }
    };

    let config = match effective_config(&state, request.config) {
        Ok(config) => config,
        Err(api_error) => return error_response(api_error),
    };

    let rows = into_rows(request.rows);
    let jobs = build_site_jobs(&rows, &config);
    let total_equipment = jobs.iter().map(|j| j.equipment_count).sum();
    let required_hours = round_hours(jobs.iter().map(|j| j.required_hours).sum());

    info!(
        correlation_id = %correlation_id,
        rows = rows.len(),
        jobs = jobs.len(),
        "Job queue built"
    );
    json_response(
        StatusCode::OK,
        JobsResponse {
            jobs,
            total_equipment,
            required_hours,
        },
    )
}
