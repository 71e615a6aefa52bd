//! Configuration types for maintenance planning.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from a YAML file or embedded in an API request.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Base working hours for each weekday, before deductions.
///
/// Saturday and Sunday have no entry: weekends never carry capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayHours {
    /// Base hours on Monday.
    #[serde(default = "default_day_hours")]
    pub monday: f64,
    /// Base hours on Tuesday.
    #[serde(default = "default_day_hours")]
    pub tuesday: f64,
    /// Base hours on Wednesday.
    #[serde(default = "default_day_hours")]
    pub wednesday: f64,
    /// Base hours on Thursday.
    #[serde(default = "default_day_hours")]
    pub thursday: f64,
    /// Base hours on Friday.
    #[serde(default = "default_day_hours")]
    pub friday: f64,
}

impl WeekdayHours {
    /// Returns the base hours for a weekday, `0.0` for Saturday and Sunday.
    pub fn for_weekday(&self, weekday: Weekday) -> f64 {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat | Weekday::Sun => 0.0,
        }
    }

    pub(crate) fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("monday", self.monday),
            ("tuesday", self.tuesday),
            ("wednesday", self.wednesday),
            ("thursday", self.thursday),
            ("friday", self.friday),
        ]
    }
}

impl Default for WeekdayHours {
    fn default() -> Self {
        Self {
            monday: DEFAULT_DAY_HOURS,
            tuesday: DEFAULT_DAY_HOURS,
            wednesday: DEFAULT_DAY_HOURS,
            thursday: DEFAULT_DAY_HOURS,
            friday: DEFAULT_DAY_HOURS,
        }
    }
}

/// Default base hours for a weekday.
pub const DEFAULT_DAY_HOURS: f64 = 8.0;

/// Default daily reserve for reactive work, in hours.
pub const DEFAULT_RESERVE_HOURS: f64 = 1.5;

/// Default lunch deduction, in hours.
pub const DEFAULT_LUNCH_HOURS: f64 = 1.0;

/// Default equipment count below which a site is a small job.
pub const DEFAULT_SMALL_JOB_THRESHOLD: f64 = 8.0;

fn default_day_hours() -> f64 {
    DEFAULT_DAY_HOURS
}

fn default_reserve_hours() -> f64 {
    DEFAULT_RESERVE_HOURS
}

fn default_lunch_hours() -> f64 {
    DEFAULT_LUNCH_HOURS
}

fn default_small_job_threshold() -> f64 {
    DEFAULT_SMALL_JOB_THRESHOLD
}

/// The complete planner configuration.
///
/// Built once per run and never mutated; the capacity calendar and the
/// allocator only ever borrow it.
///
/// # Example
///
/// ```
/// use maintenance_planner::config::PlannerConfig;
///
/// let config = PlannerConfig::default();
/// assert_eq!(config.reserve_hours, 1.5);
/// assert_eq!(config.small_job_threshold, 8.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Base hours per weekday.
    #[serde(default)]
    pub weekday_hours: WeekdayHours,
    /// Hours held back every working day for unplanned work.
    #[serde(default = "default_reserve_hours")]
    pub reserve_hours: f64,
    /// Lunch deduction in hours; `0` disables it.
    #[serde(default = "default_lunch_hours")]
    pub lunch_hours: f64,
    /// Holidays and training days with no capacity.
    #[serde(default)]
    pub off_days: BTreeSet<NaiveDate>,
    /// Sites with fewer pieces of equipment than this are placed whole.
    #[serde(default = "default_small_job_threshold")]
    pub small_job_threshold: f64,
    /// Drop sites whose aggregated equipment count is zero.
    #[serde(default)]
    pub skip_empty_sites: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            weekday_hours: WeekdayHours::default(),
            reserve_hours: DEFAULT_RESERVE_HOURS,
            lunch_hours: DEFAULT_LUNCH_HOURS,
            off_days: BTreeSet::new(),
            small_job_threshold: DEFAULT_SMALL_JOB_THRESHOLD,
            skip_empty_sites: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_has_no_base_hours() {
        let hours = WeekdayHours {
            monday: 8.0,
            tuesday: 8.0,
            wednesday: 8.0,
            thursday: 8.0,
            friday: 7.0,
        };
        assert_eq!(hours.for_weekday(Weekday::Fri), 7.0);
        assert_eq!(hours.for_weekday(Weekday::Sat), 0.0);
        assert_eq!(hours.for_weekday(Weekday::Sun), 0.0);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: PlannerConfig = serde_yaml::from_str("reserve_hours: 2.0\n").unwrap();
        assert_eq!(config.reserve_hours, 2.0);
        assert_eq!(config.lunch_hours, DEFAULT_LUNCH_HOURS);
        assert_eq!(config.weekday_hours, WeekdayHours::default());
        assert!(config.off_days.is_empty());
        assert!(!config.skip_empty_sites);
    }

    #[test]
    fn test_off_days_deserialize_from_iso_dates() {
        let yaml = "off_days:\n  - 2025-05-01\n  - 2025-05-08\n";
        let config: PlannerConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(
            config
                .off_days
                .contains(&NaiveDate::from_ymd_opt(2025, 5, 8).unwrap())
        );
        assert_eq!(config.off_days.len(), 2);
    }
}
