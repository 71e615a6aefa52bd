//! HTTP API for the maintenance planner.
//!
//! This module provides the axum-based REST API for producing maintenance
//! schedules.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{JobsRequest, ScheduleRequest, SiteRowRequest};
pub use response::{ApiError, ApiErrorResponse, JobsResponse};
pub use state::AppState;
