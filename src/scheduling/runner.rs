//! Schedule entry point.
//!
//! [`run_schedule`] annotates the day range with capacity, then either runs
//! the allocator once over the whole horizon or, when jobs carry periods,
//! once per month window.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{PlannerError, PlannerResult};
use crate::models::{
    AllocationRecord, Day, DayKind, Job, JobSummary, LeftoverReport, round_hours,
};

use super::allocator::{AllocationFault, AllocationOutcome, Allocator};
use super::capacity::{CapacityProvider, annotate_days};
use super::period::{partition_jobs, window_for};

/// What happened in one allocation window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowReport {
    /// The month, or `None` for a whole-horizon run.
    pub period: Option<NaiveDate>,
    /// First day of the window, if it has any days.
    pub start: Option<NaiveDate>,
    /// Last day of the window, if it has any days.
    pub end: Option<NaiveDate>,
    /// Jobs planned in this window.
    pub jobs: usize,
    /// Days with positive capacity.
    pub working_days: usize,
    /// Days explicitly marked off.
    pub off_days: usize,
    /// Sum of capacity over the window.
    pub capacity_hours: f64,
    /// Hours placed.
    pub scheduled_hours: f64,
    /// Hours left over.
    pub leftover_hours: f64,
}

/// The combined result of every allocation window in a run.
#[derive(Debug, Clone, Default)]
pub struct ScheduleOutcome {
    /// All records, window by window, each in day order.
    pub allocations: Vec<AllocationRecord>,
    /// One entry per window that ended with work left.
    pub leftovers: Vec<LeftoverReport>,
    /// Total unplaced hours across windows.
    pub leftover_hours: f64,
    /// Per-job ledgers, window by window.
    pub jobs: Vec<JobSummary>,
    /// Safety-bound trips across windows.
    pub faults: Vec<AllocationFault>,
    /// Per-window statistics.
    pub windows: Vec<WindowReport>,
    /// The annotated day range.
    pub days: Vec<Day>,
}

impl ScheduleOutcome {
    fn absorb(&mut self, period: Option<NaiveDate>, window: &[Day], outcome: AllocationOutcome) {
        let required: f64 = outcome.jobs.iter().map(|j| j.required_hours).sum();
        let unfinished: Vec<String> = outcome
            .unfinished_jobs()
            .map(|j| j.site_id.clone())
            .collect();

        if !unfinished.is_empty() {
            warn!(
                period = ?period,
                leftover_hours = outcome.leftover_hours,
                sites = unfinished.len(),
                "Window closed with unscheduled work"
            );
            self.leftovers.push(LeftoverReport {
                period,
                total_unallocated_hours: round_hours(outcome.leftover_hours),
                sites: unfinished,
            });
        }

        self.windows.push(WindowReport {
            period,
            start: window.first().map(|d| d.date),
            end: window.last().map(|d| d.date),
            jobs: outcome.jobs.len(),
            working_days: window.iter().filter(|d| d.has_capacity()).count(),
            off_days: window.iter().filter(|d| d.kind == DayKind::Off).count(),
            capacity_hours: window.iter().map(|d| d.capacity_hours).sum(),
            scheduled_hours: required - outcome.leftover_hours,
            leftover_hours: outcome.leftover_hours,
        });

        self.leftover_hours += outcome.leftover_hours;
        self.jobs.extend(outcome.job_summaries());
        self.faults.extend(outcome.faults);
        self.allocations.extend(outcome.allocations);
    }
}

/// Plans `jobs` over `day_range`.
///
/// # Arguments
///
/// * `jobs` - The job queue; either every job carries a period or none does
/// * `capacity` - Hours available per date
/// * `day_range` - Ordered dates to consider
/// * `small_job_threshold` - Equipment count below which a fresh job that
///   fits is placed whole
///
/// # Errors
///
/// `MixedPeriods` if only some jobs carry a period.
///
/// # Example
///
/// ```
/// use maintenance_planner::config::PlannerConfig;
/// use maintenance_planner::scheduling::{CapacityCalendar, build_jobs, days_between, run_schedule};
/// use chrono::NaiveDate;
///
/// let rows = vec![("A", 3.0), ("B", 20.0)];
/// let jobs = build_jobs(&rows, |r| r.1, |r| r.0.to_string(), None);
///
/// let config = PlannerConfig::default();
/// let calendar = CapacityCalendar::new(&config);
/// let start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
/// let days = days_between(start, end)?;
///
/// let outcome = run_schedule(jobs, &calendar, &days, config.small_job_threshold)?;
/// assert_eq!(outcome.leftover_hours, 0.0);
/// assert!(outcome.leftovers.is_empty());
/// # Ok::<(), maintenance_planner::error::PlannerError>(())
/// ```
pub fn run_schedule<P>(
    jobs: Vec<Job>,
    capacity: &P,
    day_range: &[NaiveDate],
    small_job_threshold: f64,
) -> PlannerResult<ScheduleOutcome>
where
    P: CapacityProvider + ?Sized,
{
    let days = annotate_days(capacity, day_range);
    let with_period = jobs.iter().filter(|j| j.period.is_some()).count();
    if with_period != 0 && with_period != jobs.len() {
        return Err(PlannerError::MixedPeriods);
    }

    let mut result = ScheduleOutcome::default();
    if jobs.is_empty() {
        result.days = days;
        return Ok(result);
    }

    let allocator = Allocator::new(small_job_threshold);
    if with_period == 0 {
        let outcome = allocator.allocate(jobs, &days);
        result.absorb(None, &days, outcome);
    } else {
        for (period, period_jobs) in partition_jobs(jobs) {
            let window = window_for(&days, period);
            let outcome = allocator.with_period(Some(period)).allocate(period_jobs, window);
            result.absorb(Some(period), window, outcome);
        }
    }

    info!(
        days = days.len(),
        windows = result.windows.len(),
        records = result.allocations.len(),
        leftover_hours = result.leftover_hours,
        faults = result.faults.len(),
        "Schedule computed"
    );

    result.days = days;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::models::RecordKind;
    use crate::scheduling::{CapacityCalendar, days_between, duration_hours};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn job(site: &str, equipment: f64, period: Option<NaiveDate>) -> Job {
        Job::new(site, equipment, duration_hours(equipment), period)
    }

    // ==========================================================================
    // RUN-001: zero jobs
    // ==========================================================================
    #[test]
    fn test_run_001_zero_jobs() {
        let config = PlannerConfig::default();
        let calendar = CapacityCalendar::new(&config);
        let days = days_between(date(2025, 3, 3), date(2025, 3, 7)).unwrap();

        let outcome = run_schedule(Vec::new(), &calendar, &days, 8.0).unwrap();

        assert!(outcome.allocations.is_empty());
        assert_eq!(outcome.leftover_hours, 0.0);
        assert!(outcome.leftovers.is_empty());
        assert_eq!(outcome.days.len(), 5);
    }

    // ==========================================================================
    // RUN-002: whole horizon carries work across days
    // ==========================================================================
    #[test]
    fn test_run_002_whole_horizon() {
        let config = PlannerConfig::default();
        let calendar = CapacityCalendar::new(&config);
        // Friday to Monday: weekend in between
        let days = days_between(date(2025, 3, 7), date(2025, 3, 10)).unwrap();

        let outcome = run_schedule(
            vec![job("A", 3.0, None), job("B", 20.0, None)],
            &calendar,
            &days,
            8.0,
        )
        .unwrap();

        let dates: Vec<_> = outcome.allocations.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 3, 7), date(2025, 3, 7), date(2025, 3, 10)]
        );
        assert_eq!(outcome.allocations[2].site_id, "B");
        assert_eq!(outcome.allocations[2].hours, dec("0.58"));
        assert_eq!(outcome.windows.len(), 1);
        assert_eq!(outcome.windows[0].working_days, 2);
    }

    // ==========================================================================
    // RUN-003: periods are planned independently, no rollover
    // ==========================================================================
    #[test]
    fn test_run_003_periods_do_not_roll_over() {
        let mut config = PlannerConfig::default();
        // Leave only Friday 2025-03-28 and Monday 2025-03-31 in March
        for day in 1..=27 {
            config.off_days.insert(date(2025, 3, day));
        }
        let calendar = CapacityCalendar::new(&config);
        let days = days_between(date(2025, 3, 1), date(2025, 4, 30)).unwrap();

        let march = Some(date(2025, 3, 1));
        let april = Some(date(2025, 4, 1));
        // 60 units -> 15.1667h, March has 2 x 5.5h = 11h
        let jobs = vec![job("M", 60.0, march), job("A", 4.0, april)];

        let outcome = run_schedule(jobs, &calendar, &days, 8.0).unwrap();

        assert_eq!(outcome.leftovers.len(), 1);
        let leftover = &outcome.leftovers[0];
        assert_eq!(leftover.period, march);
        assert_eq!(leftover.sites, vec!["M".to_string()]);
        assert_eq!(leftover.total_unallocated_hours, dec("4.17"));

        // No M hours in April
        assert!(
            outcome
                .allocations
                .iter()
                .filter(|r| r.kind.is_visit() && r.site_id == "M")
                .all(|r| r.date <= date(2025, 3, 31))
        );
        // Leftover record closes March
        let marker = outcome
            .allocations
            .iter()
            .find(|r| r.kind == RecordKind::Leftover)
            .unwrap();
        assert_eq!(marker.date, date(2025, 3, 31));
        assert_eq!(marker.period, march);

        // April job placed on the first working day of April (Tuesday 1st)
        let a = outcome
            .allocations
            .iter()
            .find(|r| r.site_id == "A")
            .unwrap();
        assert_eq!(a.date, date(2025, 4, 1));
        assert_eq!(a.period, april);
    }

    // ==========================================================================
    // RUN-004: off days inside a window are labelled
    // ==========================================================================
    #[test]
    fn test_run_004_off_days_labelled() {
        let mut config = PlannerConfig::default();
        config.off_days.insert(date(2025, 3, 4));
        let calendar = CapacityCalendar::new(&config);
        let days = days_between(date(2025, 3, 3), date(2025, 3, 5)).unwrap();

        let outcome = run_schedule(vec![job("B", 30.0, None)], &calendar, &days, 8.0).unwrap();

        let off: Vec<_> = outcome
            .allocations
            .iter()
            .filter(|r| r.kind == RecordKind::OffDay)
            .collect();
        assert_eq!(off.len(), 1);
        assert_eq!(off[0].date, date(2025, 3, 4));
        assert_eq!(outcome.windows[0].off_days, 1);
        assert_eq!(outcome.windows[0].working_days, 2);
    }

    // ==========================================================================
    // RUN-005: job bigger than its period's capacity
    // ==========================================================================
    #[test]
    fn test_run_005_oversized_period_job() {
        let config = PlannerConfig::default();
        let calendar = CapacityCalendar::new(&config);
        let days = days_between(date(2025, 3, 1), date(2025, 3, 31)).unwrap();
        // March 2025: 21 working days x 5.5h = 115.5h; 600 units -> 150.1667h
        let outcome = run_schedule(
            vec![job("HUGE", 600.0, Some(date(2025, 3, 1)))],
            &calendar,
            &days,
            8.0,
        )
        .unwrap();

        assert!((outcome.leftover_hours - (duration_hours(600.0) - 115.5)).abs() < 1e-6);
        assert_eq!(outcome.leftovers[0].total_unallocated_hours, dec("34.67"));
        assert!(outcome.faults.is_empty());
    }

    #[test]
    fn test_period_outside_horizon_is_all_leftover() {
        let config = PlannerConfig::default();
        let calendar = CapacityCalendar::new(&config);
        let days = days_between(date(2025, 3, 1), date(2025, 3, 31)).unwrap();

        let outcome = run_schedule(
            vec![job("LATE", 4.0, Some(date(2025, 9, 1)))],
            &calendar,
            &days,
            8.0,
        )
        .unwrap();

        assert!(outcome.allocations.is_empty());
        assert_eq!(outcome.leftovers.len(), 1);
        assert_eq!(outcome.windows[0].start, None);
    }

    #[test]
    fn test_mixed_periods_rejected() {
        let config = PlannerConfig::default();
        let calendar = CapacityCalendar::new(&config);
        let days = days_between(date(2025, 3, 1), date(2025, 3, 31)).unwrap();

        let result = run_schedule(
            vec![job("A", 1.0, None), job("B", 1.0, Some(date(2025, 3, 1)))],
            &calendar,
            &days,
            8.0,
        );
        assert!(matches!(result, Err(PlannerError::MixedPeriods)));
    }

    #[test]
    fn test_closure_capacity_provider() {
        let days = days_between(date(2025, 3, 3), date(2025, 3, 3)).unwrap();
        let flat = |_d: NaiveDate| 2.0_f64;
        let outcome = run_schedule(vec![job("B", 20.0, None)], &flat, &days, 8.0).unwrap();
        assert_eq!(outcome.allocations[0].hours, dec("2.00"));
    }
}
