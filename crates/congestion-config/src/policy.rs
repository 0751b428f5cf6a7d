//! Validated tax rules

use crate::schema::{RawHoliday, RawTaxRules};
use crate::validation::{parse_date, parse_days, parse_time};
use chrono::{Duration, NaiveDate};
use congestion_util::{ClockRange, DaysOfWeek, VehicleCategory, WallClock};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Upper bound on any daily charge, whatever the rules say
pub const MAX_DAILY_CAP: u32 = 60;

/// Fee charged for any pass whose wall-clock minute falls inside `range`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBand {
    pub range: ClockRange,
    pub fee: u32,
}

impl FeeBand {
    pub fn new(range: ClockRange, fee: u32) -> Self {
        Self { range, fee }
    }
}

/// Validated rules ready for use by the tax engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRules {
    /// Non-overlapping fee bands, sorted by start time
    pub fee_bands: Vec<FeeBand>,

    /// Upper bound on one vehicle's charge for one day
    pub daily_cap: u32,

    /// Passes within this many minutes of a window's first pass share one charge
    pub window_minutes: u32,

    /// Days of week that are always toll free
    pub toll_free_days: DaysOfWeek,

    /// Vehicle categories that never pay
    pub toll_free_vehicles: Vec<VehicleCategory>,

    /// Individual toll-free dates
    pub holidays: BTreeSet<NaiveDate>,
}

impl TaxRules {
    /// Convert from raw rules (after validation)
    pub fn from_raw(raw: RawTaxRules) -> Self {
        let mut fee_bands: Vec<FeeBand> = raw
            .fee_bands
            .iter()
            .filter_map(|band| {
                let start = parse_time(&band.start).ok()?;
                let end = parse_time(&band.end).ok()?;
                Some(FeeBand::new(ClockRange::new(start, end)?, band.fee))
            })
            .collect();
        fee_bands.sort_by_key(|band| band.range.start);

        let holidays = raw.holidays.iter().flat_map(expand_holiday).collect();

        Self {
            fee_bands,
            daily_cap: raw.daily_cap,
            window_minutes: raw.window_minutes,
            toll_free_days: parse_days(&raw.toll_free_days)
                .map(DaysOfWeek::new)
                .unwrap_or(DaysOfWeek::WEEKENDS),
            toll_free_vehicles: raw
                .toll_free_vehicles
                .iter()
                .map(|label| VehicleCategory::from_label(label))
                .collect(),
            holidays,
        }
    }

    /// Charge window length
    pub fn window(&self) -> Duration {
        Duration::minutes(self.window_minutes as i64)
    }

    /// The Gothenburg congestion tax rules for 2013
    pub fn gothenburg_2013() -> Self {
        let fee_bands = [
            ((6, 0), (6, 29), 8),
            ((6, 30), (6, 59), 13),
            ((7, 0), (7, 59), 18),
            ((8, 0), (8, 29), 13),
            ((8, 30), (14, 59), 8),
            ((15, 0), (15, 29), 13),
            ((15, 30), (16, 59), 18),
            ((17, 0), (17, 59), 13),
            ((18, 0), (18, 29), 8),
        ]
        .into_iter()
        .map(|((sh, sm), (eh, em), fee)| {
            FeeBand::new(
                ClockRange {
                    start: WallClock { hour: sh, minute: sm },
                    end: WallClock { hour: eh, minute: em },
                },
                fee,
            )
        })
        .collect();

        let holidays = [
            (1, 1),
            (3, 28),
            (3, 29),
            (4, 1),
            (4, 30),
            (5, 1),
            (5, 8),
            (5, 9),
            (6, 5),
            (6, 6),
            (6, 21),
            (11, 1),
            (12, 24),
            (12, 25),
            (12, 26),
            (12, 31),
        ]
        .into_iter()
        .chain((1..=31).map(|day| (7, day)))
        .filter_map(|(month, day)| NaiveDate::from_ymd_opt(2013, month, day))
        .collect();

        Self {
            fee_bands,
            daily_cap: MAX_DAILY_CAP,
            window_minutes: 60,
            toll_free_days: DaysOfWeek::WEEKENDS,
            toll_free_vehicles: VehicleCategory::EXEMPT.to_vec(),
            holidays,
        }
    }
}

impl Default for TaxRules {
    fn default() -> Self {
        Self::gothenburg_2013()
    }
}

fn expand_holiday(raw: &RawHoliday) -> Vec<NaiveDate> {
    match raw {
        RawHoliday::Date(value) => parse_date(value).ok().into_iter().collect(),
        RawHoliday::Range { start, end } => match (parse_date(start), parse_date(end)) {
            (Ok(first), Ok(last)) => first.iter_days().take_while(|d| *d <= last).collect(),
            _ => Vec::new(),
        },
    }
}
