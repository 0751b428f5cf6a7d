//! Daily congestion tax engine
//!
//! This crate contains:
//! - The time-of-day fee table
//! - Exemption policy (toll-free vehicles and pluggable toll-free calendars)
//! - Daily aggregation of passes into charge windows, capped per day

mod aggregator;
mod exemption;
mod fee_table;

pub use aggregator::*;
pub use exemption::*;
pub use fee_table::*;
