//! CSV export.
//!
//! Writes the day-by-day schedule and the aggregated site list. Hours are
//! written with two decimals and dates as `DD/MM/YYYY`.

use std::io::Write;

use chrono::{Datelike, NaiveDate, Weekday};
use csv::Writer;

use crate::error::PlannerResult;
use crate::models::{AllocationRecord, Job, round_hours};

/// Schedule header without the month column.
pub const SCHEDULE_HEADERS: [&str; 4] = ["Date", "Weekday", "Site", "Hours"];

/// Schedule header with the month column.
pub const SCHEDULE_HEADERS_WITH_MONTH: [&str; 5] = ["Date", "Weekday", "Month", "Site", "Hours"];

/// Site list header.
pub const SITES_HEADERS: [&str; 3] = ["Site", "Total equipment", "Estimated duration (h)"];

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Formats a date as `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Formats a month as `MM/YYYY`.
pub fn format_month(date: NaiveDate) -> String {
    date.format("%m/%Y").to_string()
}

/// Writes the schedule, one line per allocation record, in record order.
///
/// With `include_month`, a `Month` column carries the record's period, or
/// the month of its date when the run had no periods.
///
/// # Example
///
/// ```
/// use maintenance_planner::export::write_schedule_csv;
/// use maintenance_planner::models::{AllocationRecord, RecordKind};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let records = vec![AllocationRecord {
///     date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     site_id: "A".to_string(),
///     hours: Decimal::new(92, 2),
///     kind: RecordKind::SmallJob,
///     period: None,
/// }];
///
/// let mut out = Vec::new();
/// write_schedule_csv(&mut out, &records, false)?;
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "Date,Weekday,Site,Hours\n03/03/2025,Monday,A,0.92\n"
/// );
/// # Ok::<(), maintenance_planner::error::PlannerError>(())
/// ```
pub fn write_schedule_csv<W: Write>(
    writer: W,
    allocations: &[AllocationRecord],
    include_month: bool,
) -> PlannerResult<()> {
    let mut csv = Writer::from_writer(writer);
    if include_month {
        csv.write_record(SCHEDULE_HEADERS_WITH_MONTH)?;
    } else {
        csv.write_record(SCHEDULE_HEADERS)?;
    }

    for record in allocations {
        let date = format_date(record.date);
        let weekday = weekday_name(record.date.weekday());
        let hours = format!("{:.2}", record.hours);
        if include_month {
            let month = format_month(record.period.unwrap_or(record.date));
            csv.write_record([
                date.as_str(),
                weekday,
                month.as_str(),
                record.site_id.as_str(),
                hours.as_str(),
            ])?;
        } else {
            csv.write_record([date.as_str(), weekday, record.site_id.as_str(), hours.as_str()])?;
        }
    }

    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes the aggregated site list, largest equipment count first.
pub fn write_sites_csv<W: Write>(writer: W, jobs: &[Job]) -> PlannerResult<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(SITES_HEADERS)?;

    let mut ordered: Vec<&Job> = jobs.iter().collect();
    ordered.sort_by(|a, b| b.equipment_count.total_cmp(&a.equipment_count));

    for job in ordered {
        csv.write_record([
            job.site_id.clone(),
            job.equipment_count.to_string(),
            format!("{:.2}", round_hours(job.required_hours)),
        ])?;
    }

    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}
