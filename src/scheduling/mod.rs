//! Scheduling engine.
//!
//! This module contains the duration model, the capacity calendar, the job
//! queue builder, the greedy allocator and the period partitioner, plus
//! [`run_schedule`], which ties them together.

mod allocator;
mod capacity;
mod duration;
mod horizon;
mod job_queue;
mod period;
mod runner;

pub use allocator::{AllocationFault, AllocationOutcome, Allocator, MAX_ITERATIONS_PER_DAY, allocate};
pub use capacity::{CapacityCalendar, CapacityProvider, annotate_days};
pub use duration::{MINUTES_PER_EQUIPMENT, SETUP_MINUTES, duration_hours};
pub use horizon::{days_between, horizon_for_periods, month_bounds, month_key};
pub use job_queue::{PeriodExtractor, build_jobs, drop_empty_sites};
pub use period::{partition_jobs, window_for};
pub use runner::{ScheduleOutcome, WindowReport, run_schedule};
