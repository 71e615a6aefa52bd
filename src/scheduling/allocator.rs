//! Greedy allocator.
//!
//! Places job hours onto an ordered sequence of days. On each working day the
//! allocator repeatedly picks:
//!
//! 1. the first untouched small job (equipment below the threshold) whose
//!    whole duration fits in what is left of the day, placed in one block; or
//! 2. failing that, the job at the front of the queue, placed for
//!    `min(remaining capacity, remaining hours)`.
//!
//! The queue starts sorted by required hours, largest first (stable), and
//! keeps that order. Jobs leave the queue once their remaining hours drop to
//! [`DONE_EPSILON`]. Whatever is still queued after the last day is leftover.

use std::cmp::Ordering;

use chrono::NaiveDate;
use tracing::{debug, error};

use crate::models::{
    AllocationRecord, DONE_EPSILON, Day, FIT_EPSILON, Job, JobSummary, LEFTOVER_SITE, OFF_SITE,
    RecordKind, round_hours,
};

/// Upper bound on placement decisions within a single day.
pub const MAX_ITERATIONS_PER_DAY: usize = 2000;

/// Recorded when a day hits [`MAX_ITERATIONS_PER_DAY`].
///
/// This indicates a modelling defect, not bad input: every iteration should
/// either drain capacity or retire a job.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationFault {
    /// The day the loop was cut short.
    pub date: NaiveDate,
    /// Iterations performed before giving up.
    pub iterations: usize,
    /// Capacity still unassigned on that day.
    pub remaining_capacity: f64,
    /// Jobs still queued at that point.
    pub queued_jobs: usize,
}

#[derive(Debug, Clone, Default)]
struct JobUsage {
    days_used: usize,
    first_day: Option<NaiveDate>,
    last_day: Option<NaiveDate>,
}

impl JobUsage {
    fn record(&mut self, date: NaiveDate) {
        if self.last_day != Some(date) {
            self.days_used += 1;
        }
        self.first_day.get_or_insert(date);
        self.last_day = Some(date);
    }
}

/// The result of running the allocator over one window of days.
#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    /// Records in day order, then allocation order within a day.
    pub allocations: Vec<AllocationRecord>,
    /// Sum of remaining hours of jobs still queued after the last day.
    pub leftover_hours: f64,
    /// Every job in queue order, with its final `remaining_hours`.
    pub jobs: Vec<Job>,
    /// Safety-bound trips, if any.
    pub faults: Vec<AllocationFault>,
    usage: Vec<JobUsage>,
}

impl AllocationOutcome {
    fn empty() -> Self {
        Self {
            allocations: Vec::new(),
            leftover_hours: 0.0,
            jobs: Vec::new(),
            faults: Vec::new(),
            usage: Vec::new(),
        }
    }

    /// Jobs that still carry hours.
    pub fn unfinished_jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter().filter(|j| !j.is_done())
    }

    /// Per-job ledger of required, scheduled and leftover hours.
    pub fn job_summaries(&self) -> Vec<JobSummary> {
        self.jobs
            .iter()
            .zip(&self.usage)
            .map(|(job, usage)| {
                let leftover = if job.is_done() {
                    0.0
                } else {
                    job.remaining_hours
                };
                JobSummary {
                    site_id: job.site_id.clone(),
                    period: job.period,
                    equipment_count: job.equipment_count,
                    required_hours: round_hours(job.required_hours),
                    scheduled_hours: round_hours(job.scheduled_hours()),
                    leftover_hours: round_hours(leftover),
                    days_used: usage.days_used,
                    first_day: usage.first_day,
                    last_day: usage.last_day,
                }
            })
            .collect()
    }
}

/// The greedy allocation engine.
///
/// # Example
///
/// ```
/// use maintenance_planner::models::{Day, DayKind, Job, RecordKind};
/// use maintenance_planner::scheduling::Allocator;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let jobs = vec![
///     Job::new("A", 3.0, 0.75 + 10.0 / 60.0, None),
///     Job::new("B", 20.0, 5.0 + 10.0 / 60.0, None),
/// ];
/// let days = vec![Day {
///     date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     capacity_hours: 5.5,
///     kind: DayKind::Working,
/// }];
///
/// let outcome = Allocator::new(8.0).allocate(jobs, &days);
///
/// assert_eq!(outcome.allocations[0].site_id, "A");
/// assert_eq!(outcome.allocations[0].kind, RecordKind::SmallJob);
/// assert_eq!(outcome.allocations[1].site_id, "B");
/// assert_eq!(outcome.allocations[1].hours, Decimal::new(458, 2));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Allocator {
    small_job_threshold: f64,
    period: Option<NaiveDate>,
}

impl Allocator {
    /// Creates an allocator with the given small-job equipment threshold.
    pub fn new(small_job_threshold: f64) -> Self {
        Self {
            small_job_threshold,
            period: None,
        }
    }

    /// Tags every emitted record with `period`.
    pub fn with_period(mut self, period: Option<NaiveDate>) -> Self {
        self.period = period;
        self
    }

    /// Runs the allocator, consuming `jobs`.
    ///
    /// Off days produce a zero-hour [`RecordKind::OffDay`] record; days
    /// without capacity produce nothing. If work remains after the last day,
    /// a [`RecordKind::Leftover`] record dated on that day is appended.
    pub fn allocate(&self, jobs: Vec<Job>, days: &[Day]) -> AllocationOutcome {
        if jobs.is_empty() {
            return AllocationOutcome::empty();
        }

        let mut arena = jobs;
        arena.sort_by(|a, b| {
            b.required_hours
                .partial_cmp(&a.required_hours)
                .unwrap_or(Ordering::Equal)
        });
        let mut usage = vec![JobUsage::default(); arena.len()];
        let mut active: Vec<usize> = (0..arena.len()).filter(|&i| !arena[i].is_done()).collect();
        let mut allocations = Vec::new();
        let mut faults = Vec::new();

        for day in days {
            if day.is_off() {
                allocations.push(self.record(day.date, OFF_SITE, 0.0, RecordKind::OffDay));
                continue;
            }
            if !day.has_capacity() || active.is_empty() {
                continue;
            }

            let mut cap = day.capacity_hours;
            let mut iterations = 0usize;

            while cap > FIT_EPSILON && !active.is_empty() {
                if iterations >= MAX_ITERATIONS_PER_DAY {
                    error!(
                        date = %day.date,
                        iterations,
                        remaining_capacity = cap,
                        queued_jobs = active.len(),
                        "Allocator safety bound reached"
                    );
                    faults.push(AllocationFault {
                        date: day.date,
                        iterations,
                        remaining_capacity: cap,
                        queued_jobs: active.len(),
                    });
                    break;
                }
                iterations += 1;

                let (slot, kind, alloc) = match self.find_small_fit(&arena, &active, cap) {
                    Some(slot) => (slot, RecordKind::SmallJob, arena[active[slot]].remaining_hours),
                    None => (
                        0,
                        RecordKind::LargestRemaining,
                        cap.min(arena[active[0]].remaining_hours),
                    ),
                };

                let index = active[slot];
                let job = &mut arena[index];
                allocations.push(self.record(day.date, &job.site_id, alloc, kind));
                usage[index].record(day.date);
                cap -= alloc;
                job.consume(alloc);

                if job.is_done() {
                    active.remove(slot);
                }
            }
        }

        let leftover_hours: f64 = active.iter().map(|&i| arena[i].remaining_hours).sum();
        if leftover_hours > DONE_EPSILON {
            if let Some(last) = days.last() {
                allocations.push(self.record(
                    last.date,
                    LEFTOVER_SITE,
                    leftover_hours,
                    RecordKind::Leftover,
                ));
            }
        }

        debug!(
            period = ?self.period,
            days = days.len(),
            jobs = arena.len(),
            records = allocations.len(),
            unfinished = active.len(),
            leftover_hours,
            "Allocation window complete"
        );

        AllocationOutcome {
            allocations,
            leftover_hours,
            jobs: arena,
            faults,
            usage,
        }
    }

    /// First queued job that is small, untouched and fits entirely in `cap`.
    fn find_small_fit(&self, arena: &[Job], active: &[usize], cap: f64) -> Option<usize> {
        active.iter().position(|&i| {
            let job = &arena[i];
            job.equipment_count < self.small_job_threshold
                && job.is_untouched()
                && job.remaining_hours <= cap + FIT_EPSILON
        })
    }

    fn record(&self, date: NaiveDate, site: &str, hours: f64, kind: RecordKind) -> AllocationRecord {
        AllocationRecord {
            date,
            site_id: site.to_string(),
            hours: round_hours(hours),
            kind,
            period: self.period,
        }
    }
}

/// Runs the allocator over `days` with no period tag.
pub fn allocate(jobs: Vec<Job>, days: &[Day], small_job_threshold: f64) -> AllocationOutcome {
    Allocator::new(small_job_threshold).allocate(jobs, days)
}
