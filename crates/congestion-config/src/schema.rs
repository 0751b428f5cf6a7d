//! Raw rule schema (as parsed from TOML)

use serde::{Deserialize, Serialize};

/// Raw tax rules as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawTaxRules {
    /// Rules schema version
    pub rules_version: u32,

    /// Maximum charge for one vehicle on one day
    #[serde(default = "default_daily_cap")]
    pub daily_cap: u32,

    /// Length of a charge window in minutes
    #[serde(default = "default_window_minutes")]
    pub window_minutes: u32,

    /// Days of week that are always toll free: "weekends", "weekdays", "all",
    /// "none", or a list like ["sat", "sun"]
    #[serde(default = "default_toll_free_days")]
    pub toll_free_days: RawDays,

    /// Vehicle category labels that never pay
    #[serde(default)]
    pub toll_free_vehicles: Vec<String>,

    /// Time-of-day fee bands; minutes not covered by any band are free
    #[serde(default)]
    pub fee_bands: Vec<RawFeeBand>,

    /// Toll-free dates
    #[serde(default)]
    pub holidays: Vec<RawHoliday>,
}

/// Fee charged for passes within an inclusive range of minutes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawFeeBand {
    /// First charged minute (HH:MM format)
    pub start: String,

    /// Last charged minute (HH:MM format)
    pub end: String,

    pub fee: u32,
}

/// Days specification
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawDays {
    Preset(String),
    List(Vec<String>),
}

/// A single toll-free date or an inclusive range of them (YYYY-MM-DD)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawHoliday {
    Date(String),
    Range { start: String, end: String },
}

fn default_daily_cap() -> u32 {
    60
}

fn default_window_minutes() -> u32 {
    60
}

fn default_toll_free_days() -> RawDays {
    RawDays::Preset("weekends".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_rules() {
        let toml_str = r#"
            rules_version = 1
        "#;

        let rules: RawTaxRules = toml::from_str(toml_str).unwrap();
        assert_eq!(rules.daily_cap, 60);
        assert_eq!(rules.window_minutes, 60);
        assert!(matches!(rules.toll_free_days, RawDays::Preset(ref p) if p == "weekends"));
        assert!(rules.fee_bands.is_empty());
    }

    #[test]
    fn parse_bands_and_holidays() {
        let toml_str = r#"
            rules_version = 1
            daily_cap = 50
            toll_free_days = ["sun"]
            toll_free_vehicles = ["motorcycle", "emergency"]
            holidays = [
                "2024-01-01",
                { start = "2024-07-01", end = "2024-07-31" },
            ]

            [[fee_bands]]
            start = "06:00"
            end = "06:29"
            fee = 8

            [[fee_bands]]
            start = "06:30"
            end = "06:59"
            fee = 13
        "#;

        let rules: RawTaxRules = toml::from_str(toml_str).unwrap();
        assert_eq!(rules.daily_cap, 50);
        assert_eq!(rules.fee_bands.len(), 2);
        assert_eq!(rules.fee_bands[1].fee, 13);
        assert_eq!(rules.toll_free_vehicles.len(), 2);
        assert!(matches!(rules.holidays[0], RawHoliday::Date(_)));
        assert!(matches!(rules.holidays[1], RawHoliday::Range { .. }));
        assert!(matches!(rules.toll_free_days, RawDays::List(ref days) if days.len() == 1));
    }
}
