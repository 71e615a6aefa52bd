//! Allocation output models.
//!
//! This module contains the [`AllocationRecord`] emitted for every placement
//! decision, plus the per-window [`LeftoverReport`] and per-job
//! [`JobSummary`] ledgers.

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Site label used for off-day records.
pub const OFF_SITE: &str = "OFF";

/// Site label used for leftover records.
pub const LEFTOVER_SITE: &str = "unscheduled-leftover";

/// Rounds raw hours to the two decimal places used in every report.
///
/// # Example
///
/// ```
/// use maintenance_planner::models::round_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_hours(0.91666), Decimal::new(92, 2));
/// assert_eq!(round_hours(f64::NAN), Decimal::ZERO);
/// ```
pub fn round_hours(hours: f64) -> Decimal {
    Decimal::from_f64(hours)
        .unwrap_or_default()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Which rule produced an allocation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// A fresh small job placed whole (small-job-first rule).
    SmallJob,
    /// A slice of the front-of-queue job (fallback rule).
    LargestRemaining,
    /// An explicitly marked off day; always zero hours.
    OffDay,
    /// Work left over when a window closed.
    Leftover,
}

impl RecordKind {
    /// Returns true for records that represent hours actually worked on a site.
    pub fn is_visit(&self) -> bool {
        matches!(self, RecordKind::SmallJob | RecordKind::LargestRemaining)
    }
}

/// One line of the day-by-day schedule.
///
/// # Example
///
/// ```
/// use maintenance_planner::models::{AllocationRecord, RecordKind};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = AllocationRecord {
///     date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     site_id: "Gare du Nord".to_string(),
///     hours: Decimal::new(458, 2),
///     kind: RecordKind::LargestRemaining,
///     period: None,
/// };
/// assert!(record.kind.is_visit());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    /// The day the hours are placed on.
    pub date: NaiveDate,
    /// The site, or [`OFF_SITE`] / [`LEFTOVER_SITE`].
    pub site_id: String,
    /// Hours placed, rounded to 2 decimal places.
    pub hours: Decimal,
    /// The rule that produced the record.
    pub kind: RecordKind,
    /// The month window the record belongs to, if periods are used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<NaiveDate>,
}

/// Hours a window could not absorb.
///
/// One report is produced per month window in period runs. A whole-horizon
/// run that leaves work unfinished also produces one, with `period: None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeftoverReport {
    /// First day of the period, or `None` for a whole-horizon run.
    pub period: Option<NaiveDate>,
    /// Sum of `remaining_hours` over the unfinished jobs.
    pub total_unallocated_hours: Decimal,
    /// Sites still carrying work when the window closed.
    pub sites: Vec<String>,
}

/// Final ledger for one job after allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    /// The site.
    pub site_id: String,
    /// The month the job was scoped to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<NaiveDate>,
    /// Aggregated equipment count.
    pub equipment_count: f64,
    /// Hours the job needed.
    pub required_hours: Decimal,
    /// Hours placed on the calendar.
    pub scheduled_hours: Decimal,
    /// Hours that could not be placed.
    pub leftover_hours: Decimal,
    /// Number of distinct days the job was worked on.
    pub days_used: usize,
    /// First day with hours for this job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_day: Option<NaiveDate>,
    /// Last day with hours for this job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_day: Option<NaiveDate>,
}
