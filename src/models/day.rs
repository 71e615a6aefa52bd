//! Calendar day model.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Why a day has (or lacks) capacity.
///
/// The distinction between [`DayKind::Weekend`] and [`DayKind::Off`] only
/// matters for labelling: an off day gets an explicit record in the schedule,
/// a weekend is skipped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// Monday through Friday, not marked off.
    Working,
    /// Saturday or Sunday.
    Weekend,
    /// Explicitly marked off (holiday, training).
    Off,
}

impl std::fmt::Display for DayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayKind::Working => write!(f, "Working"),
            DayKind::Weekend => write!(f, "Weekend"),
            DayKind::Off => write!(f, "Off"),
        }
    }
}

/// A calendar date annotated with its available hours.
///
/// # Example
///
/// ```
/// use maintenance_planner::models::{Day, DayKind};
/// use chrono::NaiveDate;
///
/// let day = Day {
///     date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     capacity_hours: 5.5,
///     kind: DayKind::Working,
/// };
/// assert!(day.has_capacity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Day {
    /// The calendar date.
    pub date: NaiveDate,
    /// Available hours after deductions; always `>= 0`.
    pub capacity_hours: f64,
    /// Working, weekend or off.
    pub kind: DayKind,
}

impl Day {
    /// Returns true if the allocator may place work on this day.
    pub fn has_capacity(&self) -> bool {
        self.kind != DayKind::Off && self.capacity_hours > 0.0
    }

    /// Returns true if the day is explicitly marked off.
    pub fn is_off(&self) -> bool {
        self.kind == DayKind::Off
    }
}

/// Classifies a date as weekend or working, ignoring off days.
pub fn kind_for_weekday(date: NaiveDate) -> DayKind {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => DayKind::Weekend,
        _ => DayKind::Working,
    }
}
