//! Toll-free vehicles and dates

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use congestion_config::TaxRules;
use congestion_util::{DaysOfWeek, Vehicle, VehicleCategory};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Decides whether a calendar date is entirely toll free
pub trait TollFreeCalendar: Send + Sync {
    fn is_toll_free_date(&self, date: NaiveDate) -> bool;
}

/// Calendar of toll-free weekdays plus an explicit set of holidays
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HolidayCalendar {
    toll_free_days: DaysOfWeek,
    holidays: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    pub fn new(toll_free_days: DaysOfWeek, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            toll_free_days,
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn from_rules(rules: &TaxRules) -> Self {
        Self::new(rules.toll_free_days, rules.holidays.iter().copied())
    }

    pub fn gothenburg_2013() -> Self {
        Self::from_rules(&TaxRules::gothenburg_2013())
    }

    pub fn holidays(&self) -> impl Iterator<Item = &NaiveDate> {
        self.holidays.iter()
    }
}

impl TollFreeCalendar for HolidayCalendar {
    fn is_toll_free_date(&self, date: NaiveDate) -> bool {
        self.toll_free_days.contains(date.weekday()) || self.holidays.contains(&date)
    }
}

/// Adapts any date predicate into a calendar
pub struct PredicateCalendar<F>(pub F);

impl<F> TollFreeCalendar for PredicateCalendar<F>
where
    F: Fn(NaiveDate) -> bool + Send + Sync,
{
    fn is_toll_free_date(&self, date: NaiveDate) -> bool {
        (self.0)(date)
    }
}

/// Exemption rules applied before any fee lookup
#[derive(Clone)]
pub struct ExemptionPolicy {
    toll_free_vehicles: Vec<VehicleCategory>,
    calendar: Arc<dyn TollFreeCalendar>,
}

impl ExemptionPolicy {
    pub fn new(
        toll_free_vehicles: Vec<VehicleCategory>,
        calendar: Arc<dyn TollFreeCalendar>,
    ) -> Self {
        Self {
            toll_free_vehicles,
            calendar,
        }
    }

    pub fn from_rules(rules: &TaxRules) -> Self {
        Self::new(
            rules.toll_free_vehicles.clone(),
            Arc::new(HolidayCalendar::from_rules(rules)),
        )
    }

    pub fn gothenburg_2013() -> Self {
        Self::from_rules(&TaxRules::gothenburg_2013())
    }

    /// Replace the date calendar, keeping the vehicle rules
    pub fn with_calendar(mut self, calendar: Arc<dyn TollFreeCalendar>) -> Self {
        self.calendar = calendar;
        self
    }

    /// A vehicle with no known category is toll free.
    pub fn is_toll_free_vehicle(&self, category: Option<&VehicleCategory>) -> bool {
        match category {
            None => true,
            Some(category) => self.toll_free_vehicles.contains(category),
        }
    }

    pub fn is_toll_free_date(&self, date: NaiveDate) -> bool {
        self.calendar.is_toll_free_date(date)
    }

    /// Whether a pass by `vehicle` at `timestamp` is charged at all
    pub fn fee_applies(&self, vehicle: &Vehicle, timestamp: NaiveDateTime) -> bool {
        !self.is_toll_free_vehicle(vehicle.category.as_ref())
            && !self.is_toll_free_date(timestamp.date())
    }
}

impl Default for ExemptionPolicy {
    fn default() -> Self {
        Self::gothenburg_2013()
    }
}

impl fmt::Debug for ExemptionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExemptionPolicy")
            .field("toll_free_vehicles", &self.toll_free_vehicles)
            .finish_non_exhaustive()
    }
}
