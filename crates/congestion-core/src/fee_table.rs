//! Time-of-day fee table

use chrono::NaiveTime;
use congestion_config::{FeeBand, TaxRules};
use congestion_util::WallClock;

/// Maps a wall-clock minute to its base fee.
///
/// Minutes not covered by any band cost nothing. The table knows nothing
/// about dates or vehicles; see [`crate::ExemptionPolicy`] for those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeTable {
    bands: Vec<FeeBand>,
}

impl FeeTable {
    /// Build a table from bands. Bands are expected not to overlap; when
    /// they do, the earliest-starting band wins.
    pub fn from_bands(mut bands: Vec<FeeBand>) -> Self {
        bands.sort_by_key(|band| band.range.start);
        Self { bands }
    }

    pub fn from_rules(rules: &TaxRules) -> Self {
        Self::from_bands(rules.fee_bands.clone())
    }

    pub fn gothenburg_2013() -> Self {
        Self::from_rules(&TaxRules::gothenburg_2013())
    }

    pub fn bands(&self) -> &[FeeBand] {
        &self.bands
    }

    /// Fee for a pass at `hour:minute`. Out-of-range components cost nothing.
    pub fn fee_for_time(&self, hour: u32, minute: u32) -> u32 {
        match (u8::try_from(hour), u8::try_from(minute)) {
            (Ok(hour), Ok(minute)) => WallClock::new(hour, minute)
                .map(|clock| self.fee_for_clock(clock))
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// Fee for a pass at `time`; seconds are ignored.
    pub fn fee_at(&self, time: NaiveTime) -> u32 {
        self.fee_for_clock(WallClock::from_naive_time(time))
    }

    pub fn fee_for_clock(&self, clock: WallClock) -> u32 {
        self.bands
            .iter()
            .find(|band| band.range.contains(clock))
            .map(|band| band.fee)
            .unwrap_or(0)
    }
}

impl Default for FeeTable {
    fn default() -> Self {
        Self::gothenburg_2013()
    }
}
