//! Day-range and month-window helpers.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{PlannerError, PlannerResult};

/// Returns every date from `start` to `end`, both inclusive, in order.
///
/// # Errors
///
/// `InvalidDateRange` if `end` is before `start`.
///
/// # Example
///
/// ```
/// use maintenance_planner::scheduling::days_between;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
/// assert_eq!(days_between(start, end).unwrap().len(), 31);
/// ```
pub fn days_between(start: NaiveDate, end: NaiveDate) -> PlannerResult<Vec<NaiveDate>> {
    if end < start {
        return Err(PlannerError::InvalidDateRange { start, end });
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

/// Truncates a date to the first day of its month.
pub fn month_key(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First and last day of the month containing `period`.
pub fn month_bounds(period: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = month_key(period);
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .unwrap_or(first);
    (first, last)
}

/// The smallest horizon covering every month in `periods`, or `None` if empty.
pub fn horizon_for_periods<I>(periods: I) -> Option<(NaiveDate, NaiveDate)>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
    for period in periods {
        let (first, last) = month_bounds(period);
        bounds = Some(match bounds {
            None => (first, last),
            Some((lo, hi)) => (lo.min(first), hi.max(last)),
        });
    }
    bounds
}
