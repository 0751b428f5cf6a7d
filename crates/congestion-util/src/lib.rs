//! Shared vocabulary for the congestion tax engine
//!
//! This crate provides:
//! - Error types
//! - Wall-clock time of day and weekday masks
//! - Vehicle categories

mod error;
mod time;
mod vehicle;

pub use error::*;
pub use time::*;
pub use vehicle::*;
