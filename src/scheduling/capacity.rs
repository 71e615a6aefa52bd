//! Calendar and capacity provider.
//!
//! This module turns a [`PlannerConfig`] into a pure `date -> hours` function.
//! The allocator only sees the [`CapacityProvider`] trait, so callers may also
//! pass a plain closure.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::config::PlannerConfig;
use crate::models::{Day, DayKind, kind_for_weekday};

/// Anything that can say how many hours are available on a date.
///
/// Implemented for [`CapacityCalendar`] and for any `Fn(NaiveDate) -> f64`.
///
/// # Example
///
/// ```
/// use maintenance_planner::scheduling::CapacityProvider;
/// use chrono::NaiveDate;
///
/// let flat = |_date: NaiveDate| 6.0_f64;
/// let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// assert_eq!(flat.capacity_for(date), 6.0);
/// assert!(!flat.is_off_day(date));
/// ```
pub trait CapacityProvider {
    /// Available hours on `date`; never negative.
    fn capacity_for(&self, date: NaiveDate) -> f64;

    /// True if `date` is explicitly marked off.
    fn is_off_day(&self, _date: NaiveDate) -> bool {
        false
    }

    /// Annotates `date` with its capacity and kind.
    ///
    /// Weekends and off days always carry zero hours, whatever
    /// `capacity_for` reports.
    fn day(&self, date: NaiveDate) -> Day {
        let kind = if self.is_off_day(date) {
            DayKind::Off
        } else {
            kind_for_weekday(date)
        };
        let capacity_hours = match kind {
            DayKind::Off | DayKind::Weekend => 0.0,
            DayKind::Working => self.capacity_for(date).max(0.0),
        };
        Day {
            date,
            capacity_hours,
            kind,
        }
    }
}

impl<F> CapacityProvider for F
where
    F: Fn(NaiveDate) -> f64,
{
    fn capacity_for(&self, date: NaiveDate) -> f64 {
        self(date).max(0.0)
    }
}

/// Capacity derived from a weekday table, reserve and lunch deductions and
/// an off-day set.
///
/// `capacity = max(0, base[weekday] - reserve - lunch)`, or `0` on weekends
/// and off days. Queryable for any date, including dates outside the month
/// a job belongs to.
///
/// # Example
///
/// ```
/// use maintenance_planner::config::PlannerConfig;
/// use maintenance_planner::scheduling::{CapacityCalendar, CapacityProvider};
/// use chrono::NaiveDate;
///
/// let config = PlannerConfig::default();
/// let calendar = CapacityCalendar::new(&config);
/// // Monday: 8h - 1.5h reserve - 1h lunch
/// let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// assert_eq!(calendar.capacity_for(monday), 5.5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CapacityCalendar<'a> {
    config: &'a PlannerConfig,
}

impl<'a> CapacityCalendar<'a> {
    /// Creates a calendar over an immutable configuration.
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }

    /// Base hours for `weekday` before any deduction.
    pub fn base_hours(&self, weekday: Weekday) -> f64 {
        self.config.weekday_hours.for_weekday(weekday)
    }

    /// Total hours deducted from every working day.
    pub fn daily_deduction(&self) -> f64 {
        self.config.reserve_hours + self.config.lunch_hours
    }
}

impl CapacityProvider for CapacityCalendar<'_> {
    fn capacity_for(&self, date: NaiveDate) -> f64 {
        if self.is_off_day(date) {
            return 0.0;
        }
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => 0.0,
            weekday => (self.base_hours(weekday) - self.daily_deduction()).max(0.0),
        }
    }

    fn is_off_day(&self, date: NaiveDate) -> bool {
        self.config.off_days.contains(&date)
    }
}

/// Annotates every date with its capacity, preserving order.
pub fn annotate_days<P: CapacityProvider + ?Sized>(provider: &P, dates: &[NaiveDate]) -> Vec<Day> {
    dates.iter().map(|&date| provider.day(date)).collect()
}
