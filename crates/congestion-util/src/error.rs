//! Error types for congestion tax computation

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Core error type for congestion tax operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxError {
    #[error("No passes supplied")]
    EmptyPasses,

    #[error("Passes out of order: {next} comes after {previous}")]
    UnorderedPasses {
        previous: NaiveDateTime,
        next: NaiveDateTime,
    },

    #[error("Passes span more than one day: {first} and {other}")]
    MixedDays { first: NaiveDate, other: NaiveDate },
}

pub type Result<T> = std::result::Result<T, TaxError>;
