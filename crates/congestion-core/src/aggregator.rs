//! Daily aggregation of passes into charge windows

use chrono::{Duration, NaiveDate, NaiveDateTime};
use congestion_config::{MAX_DAILY_CAP, TaxRules};
use congestion_util::{Result, TaxError, Vehicle};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{ExemptionPolicy, FeeTable};

/// A run of passes charged once, at the highest fee among them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeWindow {
    /// The pass that opened this window
    pub start: NaiveDateTime,
    /// Number of passes inside the window, including the opening one
    pub passes: usize,
    pub charge: u32,
}

/// Result of a daily tax computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTax {
    pub date: NaiveDate,
    pub windows: Vec<ChargeWindow>,
    /// Sum of window charges before the daily cap
    pub raw_total: u32,
    /// Amount owed for the day
    pub total: u32,
    /// True if the cap reduced the total
    pub capped: bool,
}

/// Computes one vehicle's tax for one day
#[derive(Debug, Clone)]
pub struct DailyAggregator {
    fee_table: FeeTable,
    exemptions: ExemptionPolicy,
    daily_cap: u32,
    window: Duration,
}

impl DailyAggregator {
    /// `daily_cap` is clamped to [`MAX_DAILY_CAP`].
    pub fn new(
        fee_table: FeeTable,
        exemptions: ExemptionPolicy,
        daily_cap: u32,
        window: Duration,
    ) -> Self {
        Self {
            fee_table,
            exemptions,
            daily_cap: daily_cap.min(MAX_DAILY_CAP),
            window,
        }
    }

    pub fn from_rules(rules: &TaxRules) -> Self {
        Self::new(
            FeeTable::from_rules(rules),
            ExemptionPolicy::from_rules(rules),
            rules.daily_cap,
            rules.window(),
        )
    }

    pub fn gothenburg_2013() -> Self {
        Self::from_rules(&TaxRules::gothenburg_2013())
    }

    pub fn fee_table(&self) -> &FeeTable {
        &self.fee_table
    }

    pub fn exemptions(&self) -> &ExemptionPolicy {
        &self.exemptions
    }

    pub fn daily_cap(&self) -> u32 {
        self.daily_cap
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Fee for a single pass, zero if the vehicle or the date is toll free
    pub fn fee_for_pass(&self, vehicle: &Vehicle, timestamp: NaiveDateTime) -> u32 {
        if !self.exemptions.fee_applies(vehicle, timestamp) {
            return 0;
        }
        self.fee_table.fee_at(timestamp.time())
    }

    /// Total tax owed by `vehicle` for the passes of a single day
    pub fn compute_daily_tax(&self, vehicle: &Vehicle, passes: &[NaiveDateTime]) -> Result<u32> {
        self.daily_breakdown(vehicle, passes).map(|tax| tax.total)
    }

    /// Group passes into charge windows and total them.
    ///
    /// `passes` must be non-empty, sorted, and all on one calendar day. A
    /// window opens at a pass and takes in every following pass that is at
    /// most the window length after that opening pass; the next pass beyond
    /// it opens a new window.
    pub fn daily_breakdown(&self, vehicle: &Vehicle, passes: &[NaiveDateTime]) -> Result<DailyTax> {
        let date = check_passes(passes)?;

        if self.exemptions.is_toll_free_vehicle(vehicle.category.as_ref()) {
            debug!(%vehicle, "Vehicle is toll free");
        } else if self.exemptions.is_toll_free_date(date) {
            debug!(%date, "Date is toll free");
        }

        let mut windows: Vec<ChargeWindow> = Vec::new();
        for &pass in passes {
            let fee = self.fee_for_pass(vehicle, pass);

            match windows.last_mut() {
                Some(current) if pass.signed_duration_since(current.start) <= self.window => {
                    current.passes += 1;
                    current.charge = current.charge.max(fee);
                    trace!(%pass, fee, window_start = %current.start, "Pass joins window");
                }
                _ => {
                    windows.push(ChargeWindow {
                        start: pass,
                        passes: 1,
                        charge: fee,
                    });
                    trace!(%pass, fee, "Pass opens window");
                }
            }
        }

        let raw_total = windows
            .iter()
            .map(|w| w.charge)
            .fold(0u32, u32::saturating_add);
        let total = raw_total.min(self.daily_cap);
        let capped = total < raw_total;

        if capped {
            warn!(raw_total, daily_cap = self.daily_cap, "Daily cap applied");
        }

        debug!(
            %vehicle,
            %date,
            passes = passes.len(),
            windows = windows.len(),
            raw_total,
            total,
            "Computed daily tax"
        );

        Ok(DailyTax {
            date,
            windows,
            raw_total,
            total,
            capped,
        })
    }
}

impl Default for DailyAggregator {
    fn default() -> Self {
        Self::gothenburg_2013()
    }
}

/// Returns the single day shared by all passes
fn check_passes(passes: &[NaiveDateTime]) -> Result<NaiveDate> {
    let first = passes.first().ok_or(TaxError::EmptyPasses)?;
    let date = first.date();

    for pair in passes.windows(2) {
        if pair[1] < pair[0] {
            return Err(TaxError::UnorderedPasses {
                previous: pair[0],
                next: pair[1],
            });
        }
    }

    if let Some(other) = passes.iter().map(|p| p.date()).find(|d| *d != date) {
        return Err(TaxError::MixedDays { first: date, other });
    }

    Ok(date)
}
