//! Core data models for the maintenance planner.
//!
//! This module contains all the domain models used throughout the planner.

mod allocation;
mod day;
mod job;
mod schedule_result;

pub use allocation::{
    AllocationRecord, JobSummary, LEFTOVER_SITE, LeftoverReport, OFF_SITE, RecordKind,
    round_hours,
};
pub use day::{Day, DayKind, kind_for_weekday};
pub use job::{DONE_EPSILON, FIT_EPSILON, Job};
pub use schedule_result::{AuditStep, AuditTrace, AuditWarning, ScheduleResult, ScheduleTotals};
