//! Greedy maintenance planner.
//!
//! This crate turns a list of sites and their equipment counts into a
//! day-by-day visit schedule for a single technician. Each site needs
//! 15 minutes per piece of equipment plus 10 minutes of setup; each working
//! day offers a configurable number of hours after reserve and lunch
//! deductions. Small jobs are placed whole when they fit, and the largest
//! remaining job absorbs whatever capacity is left.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod models;
pub mod planner;
pub mod scheduling;
