//! Job queue builder.
//!
//! Aggregates raw rows into one [`Job`] per site (or per site and month),
//! summing equipment counts and applying the duration model. Row access is
//! done through caller-supplied extractors, so this module knows nothing
//! about spreadsheets, JSON or column names.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::Job;

use super::duration::duration_hours;

/// Extracts a row's month; `None` drops the row.
pub type PeriodExtractor<'a, R> = &'a dyn Fn(&R) -> Option<NaiveDate>;

/// Aggregates rows into jobs.
///
/// # Arguments
///
/// * `rows` - Already-parsed rows, in any representation
/// * `equipment` - Returns the row's equipment count; non-finite or negative
///   values are treated as zero
/// * `site` - Returns the row's site identifier
/// * `period` - If given, scopes jobs to months; rows it maps to `None` are
///   dropped from aggregation
///
/// # Returns
///
/// One job per distinct `(site, period)` in first-appearance order, with
/// `required_hours = duration_hours(total equipment)` and
/// `remaining_hours = required_hours`.
///
/// # Example
///
/// ```
/// use maintenance_planner::scheduling::build_jobs;
///
/// let rows = vec![("A", 2.0), ("B", 20.0), ("A", 1.0)];
/// let jobs = build_jobs(&rows, |r| r.1, |r| r.0.to_string(), None);
///
/// assert_eq!(jobs.len(), 2);
/// assert_eq!(jobs[0].site_id, "A");
/// assert_eq!(jobs[0].equipment_count, 3.0);
/// assert!((jobs[0].required_hours - 0.9167).abs() < 1e-4);
/// ```
pub fn build_jobs<R, E, S>(
    rows: &[R],
    equipment: E,
    site: S,
    period: Option<PeriodExtractor<'_, R>>,
) -> Vec<Job>
where
    E: Fn(&R) -> f64,
    S: Fn(&R) -> String,
{
    let mut index: HashMap<(String, Option<NaiveDate>), usize> = HashMap::new();
    let mut groups: Vec<(String, Option<NaiveDate>, f64)> = Vec::new();
    let mut dropped = 0usize;

    for row in rows {
        let key_period = match period {
            Some(extract) => match extract(row) {
                Some(p) => Some(p),
                None => {
                    dropped += 1;
                    continue;
                }
            },
            None => None,
        };

        let count = sanitize_count(equipment(row));
        let key = (site(row), key_period);
        match index.get(&key) {
            Some(&i) => groups[i].2 += count,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key.0, key.1, count));
            }
        }
    }

    if dropped > 0 {
        warn!(dropped_rows = dropped, "Dropped rows with unparseable period");
    }

    let jobs: Vec<Job> = groups
        .into_iter()
        .map(|(site_id, period, count)| Job::new(site_id, count, duration_hours(count), period))
        .collect();

    debug!(rows = rows.len(), jobs = jobs.len(), "Built job queue");
    jobs
}

/// Removes jobs whose aggregated equipment count is zero.
///
/// Such jobs still cost the fixed setup time, so they are kept unless the
/// caller opts out.
pub fn drop_empty_sites(jobs: Vec<Job>) -> Vec<Job> {
    let before = jobs.len();
    let kept: Vec<Job> = jobs
        .into_iter()
        .filter(|job| job.equipment_count > 0.0)
        .collect();
    if kept.len() < before {
        debug!(removed = before - kept.len(), "Dropped sites without equipment");
    }
    kept
}

fn sanitize_count(count: f64) -> f64 {
    if count.is_finite() && count > 0.0 {
        count
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        site: &'static str,
        equipment: &'static str,
        month: &'static str,
    }

    fn row(site: &'static str, equipment: &'static str, month: &'static str) -> Row {
        Row {
            site,
            equipment,
            month,
        }
    }

    fn equipment_of(r: &Row) -> f64 {
        r.equipment.parse().unwrap_or(0.0)
    }

    fn site_of(r: &Row) -> String {
        r.site.to_string()
    }

    fn month_of(r: &Row) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&format!("{}-01", r.month), "%Y-%m-%d").ok()
    }

    // ==========================================================================
    // JQB-001: rows for the same site are summed
    // ==========================================================================
    #[test]
    fn test_jqb_001_sums_per_site() {
        let rows = vec![row("A", "2", ""), row("B", "20", ""), row("A", "1", "")];
        let jobs = build_jobs(&rows, equipment_of, site_of, None);

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].site_id, "A");
        assert_eq!(jobs[0].equipment_count, 3.0);
        assert_eq!(jobs[1].equipment_count, 20.0);
        assert!((jobs[1].required_hours - 5.1667).abs() < 1e-4);
        assert!(jobs.iter().all(|j| j.is_untouched()));
    }

    // ==========================================================================
    // JQB-002: non-numeric counts become zero but the site stays
    // ==========================================================================
    #[test]
    fn test_jqb_002_non_numeric_count_is_zero() {
        let rows = vec![row("C", "n/a", "")];
        let jobs = build_jobs(&rows, equipment_of, site_of, None);

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].equipment_count, 0.0);
        assert!((jobs[0].required_hours - 10.0 / 60.0).abs() < 1e-12);
    }

    // ==========================================================================
    // JQB-003: periods split the same site into separate jobs
    // ==========================================================================
    #[test]
    fn test_jqb_003_site_split_by_period() {
        let rows = vec![
            row("A", "4", "2025-03"),
            row("A", "6", "2025-04"),
            row("A", "1", "2025-03"),
        ];
        let jobs = build_jobs(&rows, equipment_of, site_of, Some(&month_of));

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].period, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(jobs[0].equipment_count, 5.0);
        assert_eq!(jobs[1].period, NaiveDate::from_ymd_opt(2025, 4, 1));
        assert_eq!(jobs[1].equipment_count, 6.0);
    }

    // ==========================================================================
    // JQB-004: rows with unparseable periods are dropped
    // ==========================================================================
    #[test]
    fn test_jqb_004_unparseable_period_dropped() {
        let rows = vec![row("A", "4", "2025-03"), row("B", "9", "someday")];
        let jobs = build_jobs(&rows, equipment_of, site_of, Some(&month_of));

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].site_id, "A");
    }

    #[test]
    fn test_negative_count_clamped() {
        let rows = vec![row("A", "-5", ""), row("A", "2", "")];
        let jobs = build_jobs(&rows, equipment_of, site_of, None);
        assert_eq!(jobs[0].equipment_count, 2.0);
    }

    #[test]
    fn test_empty_rows_give_empty_queue() {
        let rows: Vec<Row> = Vec::new();
        assert!(build_jobs(&rows, equipment_of, site_of, None).is_empty());
    }

    #[test]
    fn test_drop_empty_sites() {
        let rows = vec![row("A", "0", ""), row("B", "3", "")];
        let jobs = drop_empty_sites(build_jobs(&rows, equipment_of, site_of, None));
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].site_id, "B");
    }
}
