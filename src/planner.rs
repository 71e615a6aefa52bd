//! End-to-end planning.
//!
//! [`plan_maintenance`] takes extracted input rows, a horizon and a
//! configuration, and produces a [`ScheduleResult`] carrying the schedule,
//! per-job ledgers, totals and an audit trace of each phase.

use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PlannerConfig;
use crate::error::{PlannerError, PlannerResult};
use crate::input::{SiteRow, parse_period};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, DayKind, Job, ScheduleResult, ScheduleTotals,
    round_hours,
};
use crate::scheduling::{
    CapacityCalendar, build_jobs, days_between, drop_empty_sites, horizon_for_periods,
    run_schedule,
};

/// Warning code for work that did not fit its window.
pub const WARNING_UNSCHEDULED_WORK: &str = "UNSCHEDULED_WORK";
/// Warning code for an allocator safety-bound trip.
pub const WARNING_SAFETY_BOUND: &str = "ALLOCATION_SAFETY_BOUND";
/// Warning code for rows dropped because their period did not parse.
pub const WARNING_UNPARSEABLE_PERIOD: &str = "UNPARSEABLE_PERIOD";
/// Warning code for a period with no day inside the horizon.
pub const WARNING_PERIOD_OUTSIDE_HORIZON: &str = "PERIOD_OUTSIDE_HORIZON";

/// Returns true if the rows are scoped to months.
pub fn uses_periods(rows: &[SiteRow]) -> bool {
    rows.iter().any(|r| r.period.is_some())
}

/// Aggregates rows into the job queue.
///
/// When any row carries period text, every row is scoped to its month and
/// rows whose period does not parse are dropped. Zero-equipment sites are
/// dropped only if the configuration asks for it.
///
/// # Example
///
/// ```
/// use maintenance_planner::config::PlannerConfig;
/// use maintenance_planner::input::SiteRow;
/// use maintenance_planner::planner::build_site_jobs;
///
/// let rows = vec![
///     SiteRow { site: "A".into(), equipment_count: 2.0, period: None },
///     SiteRow { site: "A".into(), equipment_count: 1.0, period: None },
/// ];
/// let jobs = build_site_jobs(&rows, &PlannerConfig::default());
/// assert_eq!(jobs.len(), 1);
/// assert_eq!(jobs[0].equipment_count, 3.0);
/// ```
pub fn build_site_jobs(rows: &[SiteRow], config: &PlannerConfig) -> Vec<Job> {
    let period_of = |row: &SiteRow| row.period.as_deref().and_then(parse_period);
    let period = if uses_periods(rows) {
        Some(&period_of as &dyn Fn(&SiteRow) -> Option<NaiveDate>)
    } else {
        None
    };

    let jobs = build_jobs(rows, |r| r.equipment_count, |r| r.site.clone(), period);
    if config.skip_empty_sites {
        drop_empty_sites(jobs)
    } else {
        jobs
    }
}

/// Plans maintenance visits for `rows`.
///
/// `horizon` is the inclusive `(start, end)` day range. It may be omitted
/// when the rows carry periods, in which case it spans every month named.
///
/// # Errors
///
/// - `InvalidDateRange` if the horizon ends before it starts
/// - `MissingHorizon` if no horizon is given and none can be derived
/// - `MixedPeriods` if only some jobs carry a period
pub fn plan_maintenance(
    rows: &[SiteRow],
    horizon: Option<(NaiveDate, NaiveDate)>,
    config: &PlannerConfig,
) -> PlannerResult<ScheduleResult> {
    let start_time = Instant::now();
    let run_id = Uuid::new_v4();
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    // Job queue
    let jobs = build_site_jobs(rows, config);
    let period_mode = uses_periods(rows);
    if period_mode {
        let dropped = rows
            .iter()
            .filter(|r| r.period.as_deref().and_then(parse_period).is_none())
            .count();
        if dropped > 0 {
            warnings.push(AuditWarning {
                code: WARNING_UNPARSEABLE_PERIOD.to_string(),
                message: format!("{} row(s) dropped: period could not be parsed", dropped),
                severity: "low".to_string(),
            });
        }
    }

    let total_equipment: f64 = jobs.iter().map(|j| j.equipment_count).sum();
    let required_hours: f64 = jobs.iter().map(|j| j.required_hours).sum();
    steps.push(AuditStep {
        step_number,
        rule_id: "job_queue_build".to_string(),
        rule_name: "Job Queue Build".to_string(),
        input: json!({
            "rows": rows.len(),
            "period_mode": period_mode,
            "skip_empty_sites": config.skip_empty_sites,
        }),
        output: json!({
            "jobs": jobs.len(),
            "total_equipment": total_equipment,
            "required_hours": round_hours(required_hours).to_string(),
        }),
        reasoning: format!(
            "Aggregated {} row(s) into {} job(s) at 15 min per equipment plus 10 min setup",
            rows.len(),
            jobs.len()
        ),
    });
    step_number += 1;

    // Horizon and capacity
    let (start, end) = match horizon {
        Some(range) => range,
        None => horizon_for_periods(jobs.iter().filter_map(|j| j.period))
            .ok_or(PlannerError::MissingHorizon)?,
    };
    let day_range = days_between(start, end)?;
    let calendar = CapacityCalendar::new(config);
    let outcome = run_schedule(jobs, &calendar, &day_range, config.small_job_threshold)?;

    let working_days = outcome.days.iter().filter(|d| d.has_capacity()).count();
    let off_days = outcome
        .days
        .iter()
        .filter(|d| d.kind == DayKind::Off)
        .count();
    let capacity_hours: f64 = outcome.days.iter().map(|d| d.capacity_hours).sum();
    steps.push(AuditStep {
        step_number,
        rule_id: "capacity_calendar".to_string(),
        rule_name: "Capacity Calendar".to_string(),
        input: json!({
            "start": start,
            "end": end,
            "reserve_hours": config.reserve_hours,
            "lunch_hours": config.lunch_hours,
            "off_days": config.off_days.len(),
        }),
        output: json!({
            "days": outcome.days.len(),
            "working_days": working_days,
            "off_days": off_days,
            "capacity_hours": round_hours(capacity_hours).to_string(),
        }),
        reasoning: format!(
            "{} working day(s) between {} and {}, {} off day(s)",
            working_days, start, end, off_days
        ),
    });
    step_number += 1;

    // Allocation windows
    for window in &outcome.windows {
        if window.start.is_none() {
            if let Some(period) = window.period {
                warnings.push(AuditWarning {
                    code: WARNING_PERIOD_OUTSIDE_HORIZON.to_string(),
                    message: format!(
                        "Period {} has no day inside the horizon; its work is unscheduled",
                        period.format("%m/%Y")
                    ),
                    severity: "medium".to_string(),
                });
            }
        }
        steps.push(AuditStep {
            step_number,
            rule_id: "greedy_allocation".to_string(),
            rule_name: "Greedy Allocation".to_string(),
            input: json!({
                "period": window.period,
                "start": window.start,
                "end": window.end,
                "jobs": window.jobs,
                "capacity_hours": round_hours(window.capacity_hours).to_string(),
                "small_job_threshold": config.small_job_threshold,
            }),
            output: json!({
                "scheduled_hours": round_hours(window.scheduled_hours).to_string(),
                "leftover_hours": round_hours(window.leftover_hours).to_string(),
                "working_days": window.working_days,
            }),
            reasoning: if window.leftover_hours > 0.0 {
                "Capacity exhausted before every job was placed".to_string()
            } else {
                "Every job placed within the window".to_string()
            },
        });
        step_number += 1;
    }

    for leftover in &outcome.leftovers {
        let scope = match leftover.period {
            Some(period) => format!("period {}", period.format("%m/%Y")),
            None => "the horizon".to_string(),
        };
        warnings.push(AuditWarning {
            code: WARNING_UNSCHEDULED_WORK.to_string(),
            message: format!(
                "{}h across {} site(s) could not be placed within {}",
                leftover.total_unallocated_hours,
                leftover.sites.len(),
                scope
            ),
            severity: "medium".to_string(),
        });
    }

    for fault in &outcome.faults {
        warnings.push(AuditWarning {
            code: WARNING_SAFETY_BOUND.to_string(),
            message: format!(
                "Allocation on {} stopped after {} iterations with {} job(s) queued",
                fault.date, fault.iterations, fault.queued_jobs
            ),
            severity: "high".to_string(),
        });
    }

    let required = round_hours(required_hours);
    let leftover = round_hours(outcome.leftover_hours);
    let totals = ScheduleTotals {
        sites: outcome.jobs.len(),
        total_equipment,
        required_hours: required,
        scheduled_hours: (required - leftover).max(Decimal::ZERO),
        leftover_hours: leftover,
        working_days,
        off_days,
    };

    if !warnings.is_empty() {
        warn!(run_id = %run_id, warnings = warnings.len(), "Planning produced warnings");
    }
    let duration_us = start_time.elapsed().as_micros() as u64;
    info!(
        run_id = %run_id,
        sites = totals.sites,
        scheduled_hours = %totals.scheduled_hours,
        leftover_hours = %totals.leftover_hours,
        duration_us,
        "Planning completed"
    );

    Ok(ScheduleResult {
        run_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        horizon_start: start,
        horizon_end: end,
        allocations: outcome.allocations,
        leftovers: outcome.leftovers,
        jobs: outcome.jobs,
        totals,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}
