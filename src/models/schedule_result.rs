//! Schedule result models.
//!
//! This module contains the [`ScheduleResult`] type and its associated
//! structures that capture all outputs from a planning run: the allocation
//! records, leftover reports, per-job ledgers, totals and an audit trace.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AllocationRecord, JobSummary, LeftoverReport};

/// Aggregated totals for a planning run.
///
/// # Example
///
/// ```
/// use maintenance_planner::models::ScheduleTotals;
/// use rust_decimal::Decimal;
///
/// let totals = ScheduleTotals {
///     sites: 12,
///     total_equipment: 140.0,
///     required_hours: Decimal::new(3700, 2),
///     scheduled_hours: Decimal::new(3500, 2),
///     leftover_hours: Decimal::new(200, 2),
///     working_days: 6,
///     off_days: 1,
/// };
/// assert_eq!(totals.scheduled_hours + totals.leftover_hours, totals.required_hours);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTotals {
    /// Number of jobs in the queue.
    pub sites: usize,
    /// Sum of equipment counts across jobs.
    pub total_equipment: f64,
    /// Sum of required hours across jobs.
    pub required_hours: Decimal,
    /// Hours placed on the calendar.
    pub scheduled_hours: Decimal,
    /// Hours left unplaced.
    pub leftover_hours: Decimal,
    /// Days in the horizon with positive capacity.
    pub working_days: usize,
    /// Days in the horizon explicitly marked off.
    pub off_days: usize,
}

/// A single step in the audit trace recording a planning phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// Identifier of the phase (e.g. `job_queue_build`).
    pub rule_id: String,
    /// Human-readable name of the phase.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the outcome.
    pub reasoning: String,
}

/// A warning generated during planning.
///
/// Leftover work is reported with severity `medium`; an allocator safety
/// bound trip, which indicates a modelling defect rather than bad input,
/// is reported with severity `high`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (`low`, `medium`, `high`).
    pub severity: String,
}

/// The complete audit trace for a planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of planning steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during planning.
    pub warnings: Vec<AuditWarning>,
    /// The total planning duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run completed.
    pub timestamp: DateTime<Utc>,
    /// Version of the planner that produced the result.
    pub engine_version: String,
    /// First day of the planning horizon.
    pub horizon_start: NaiveDate,
    /// Last day of the planning horizon.
    pub horizon_end: NaiveDate,
    /// Day-by-day, site-by-site schedule in emission order.
    pub allocations: Vec<AllocationRecord>,
    /// Unplaced work per window.
    pub leftovers: Vec<LeftoverReport>,
    /// Final ledger per job.
    pub jobs: Vec<JobSummary>,
    /// Run totals.
    pub totals: ScheduleTotals,
    /// What the planner did and why.
    pub audit_trace: AuditTrace,
}

impl ScheduleResult {
    /// Returns the records for a single date, in allocation order.
    pub fn allocations_on(&self, date: NaiveDate) -> impl Iterator<Item = &AllocationRecord> {
        self.allocations.iter().filter(move |r| r.date == date)
    }

    /// Returns true if any job was left unfinished.
    pub fn has_leftovers(&self) -> bool {
        !self.leftovers.is_empty()
    }
}
