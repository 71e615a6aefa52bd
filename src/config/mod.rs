//! Configuration loading and management for the maintenance planner.
//!
//! This module provides the immutable [`PlannerConfig`] record (weekday hours,
//! reserve and lunch deductions, off days, small-job threshold) and the
//! [`ConfigLoader`] that reads it from YAML.
//!
//! # Example
//!
//! ```no_run
//! use maintenance_planner::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/planner.yaml").unwrap();
//! println!("Small job threshold: {}", loader.config().small_job_threshold);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, validate};
pub use types::{
    DEFAULT_DAY_HOURS, DEFAULT_LUNCH_HOURS, DEFAULT_RESERVE_HOURS, DEFAULT_SMALL_JOB_THRESHOLD,
    PlannerConfig, WeekdayHours,
};
