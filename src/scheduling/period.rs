//! Period partitioner.
//!
//! When jobs are scoped to months, each month is planned on its own: the
//! allocator sees only that month's jobs and only the days of the horizon
//! that fall inside that month. Unplaced hours never roll into another
//! month's window; they are reported as that month's leftover.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Day, Job};

use super::horizon::month_key;

/// Groups jobs by period, in ascending period order.
///
/// Jobs without a period are not expected here and are ignored.
pub fn partition_jobs(jobs: Vec<Job>) -> BTreeMap<NaiveDate, Vec<Job>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Job>> = BTreeMap::new();
    for job in jobs {
        if let Some(period) = job.period {
            buckets.entry(month_key(period)).or_default().push(job);
        }
    }
    buckets
}

/// The contiguous run of `days` falling inside `period`'s month.
///
/// Empty if the horizon does not reach that month.
pub fn window_for(days: &[Day], period: NaiveDate) -> &[Day] {
    let key = month_key(period);
    let start = days.iter().position(|d| month_key(d.date) == key);
    match start {
        Some(start) => {
            let len = days[start..]
                .iter()
                .take_while(|d| month_key(d.date) == key)
                .count();
            debug!(period = %key, days = len, "Resolved period window");
            &days[start..start + len]
        }
        None => &[],
    }
}
