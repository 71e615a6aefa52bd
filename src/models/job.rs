//! Job model.
//!
//! A [`Job`] is the schedulable work for one site, optionally scoped to one
//! month. It is built once by the job queue builder and then consumed by the
//! allocator, which only ever decreases `remaining_hours`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tolerance for "untouched" and "fits" comparisons.
pub const FIT_EPSILON: f64 = 1e-9;

/// A job at or below this many remaining hours is finished.
pub const DONE_EPSILON: f64 = 1e-6;

/// The unit of schedulable work for one site.
///
/// # Example
///
/// ```
/// use maintenance_planner::models::Job;
///
/// let job = Job::new("Gare du Nord", 10.0, 2.6667, None);
/// assert!(job.is_untouched());
/// assert!(!job.is_done());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Opaque site identifier; not unique across periods.
    pub site_id: String,
    /// Aggregated equipment count for the site.
    pub equipment_count: f64,
    /// Total hours the visit requires.
    pub required_hours: f64,
    /// Hours still to be placed.
    pub remaining_hours: f64,
    /// First day of the month this job is scoped to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<NaiveDate>,
}

impl Job {
    /// Creates a fresh job with `remaining_hours == required_hours`.
    pub fn new(
        site_id: impl Into<String>,
        equipment_count: f64,
        required_hours: f64,
        period: Option<NaiveDate>,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            equipment_count,
            required_hours,
            remaining_hours: required_hours,
            period,
        }
    }

    /// Returns true if no hours have been placed yet.
    pub fn is_untouched(&self) -> bool {
        (self.remaining_hours - self.required_hours).abs() <= FIT_EPSILON
    }

    /// Returns true once the job no longer belongs in the active queue.
    pub fn is_done(&self) -> bool {
        self.remaining_hours <= DONE_EPSILON
    }

    /// Hours placed so far.
    pub fn scheduled_hours(&self) -> f64 {
        self.required_hours - self.remaining_hours
    }

    /// Deducts placed hours. Remaining hours never go below zero.
    pub(crate) fn consume(&mut self, hours: f64) {
        self.remaining_hours = (self.remaining_hours - hours).max(0.0);
    }
}
