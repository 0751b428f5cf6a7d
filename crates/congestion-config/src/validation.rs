//! Rule validation

use crate::policy::MAX_DAILY_CAP;
use crate::schema::{RawDays, RawFeeBand, RawHoliday, RawTaxRules};
use chrono::NaiveDate;
use congestion_util::{ClockRange, VehicleCategory, WallClock};
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Invalid time format '{value}': {message}")]
    InvalidTimeFormat { value: String, message: String },

    #[error("Invalid date format '{value}': {message}")]
    InvalidDateFormat { value: String, message: String },

    #[error("Fee band {start}-{end} ends before it starts")]
    InvertedFeeBand { start: String, end: String },

    #[error("Fee bands {first} and {second} overlap")]
    OverlappingFeeBands { first: String, second: String },

    #[error("Holiday range {start}..{end} ends before it starts")]
    InvertedHolidayRange { start: String, end: String },

    #[error("Invalid day specification: {0}")]
    InvalidDaySpec(String),

    #[error("Unknown vehicle category: {0}")]
    UnknownVehicleCategory(String),

    #[error("Charge window must be at least one minute")]
    ZeroWindow,

    #[error("Daily cap {cap} exceeds the maximum of {max}")]
    DailyCapTooHigh { cap: u32, max: u32 },

    #[error("Fee {fee} for band {start}-{end} exceeds the daily maximum of {max}")]
    FeeTooHigh {
        start: String,
        end: String,
        fee: u32,
        max: u32,
    },
}

/// Validate raw rules, collecting every problem found
pub fn validate_rules(rules: &RawTaxRules) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if rules.window_minutes == 0 {
        errors.push(ValidationError::ZeroWindow);
    }

    if rules.daily_cap > MAX_DAILY_CAP {
        errors.push(ValidationError::DailyCapTooHigh {
            cap: rules.daily_cap,
            max: MAX_DAILY_CAP,
        });
    }

    if let Err(e) = parse_days(&rules.toll_free_days) {
        errors.push(ValidationError::InvalidDaySpec(e));
    }

    for label in &rules.toll_free_vehicles {
        if let VehicleCategory::Other(other) = VehicleCategory::from_label(label) {
            errors.push(ValidationError::UnknownVehicleCategory(other));
        }
    }

    errors.extend(validate_fee_bands(&rules.fee_bands));

    for holiday in &rules.holidays {
        errors.extend(validate_holiday(holiday));
    }

    errors
}

fn validate_fee_bands(bands: &[RawFeeBand]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut ranges: Vec<ClockRange> = Vec::new();

    for band in bands {
        if band.fee > MAX_DAILY_CAP {
            errors.push(ValidationError::FeeTooHigh {
                start: band.start.clone(),
                end: band.end.clone(),
                fee: band.fee,
                max: MAX_DAILY_CAP,
            });
        }

        let start = parse_time(&band.start).map_err(|message| ValidationError::InvalidTimeFormat {
            value: band.start.clone(),
            message,
        });
        let end = parse_time(&band.end).map_err(|message| ValidationError::InvalidTimeFormat {
            value: band.end.clone(),
            message,
        });

        let (start, end) = match (start, end) {
            (Ok(start), Ok(end)) => (start, end),
            (start, end) => {
                errors.extend(start.err());
                errors.extend(end.err());
                continue;
            }
        };

        let Some(range) = ClockRange::new(start, end) else {
            errors.push(ValidationError::InvertedFeeBand {
                start: band.start.clone(),
                end: band.end.clone(),
            });
            continue;
        };

        if let Some(existing) = ranges.iter().find(|r| r.overlaps(&range)) {
            errors.push(ValidationError::OverlappingFeeBands {
                first: existing.to_string(),
                second: range.to_string(),
            });
        }
        ranges.push(range);
    }

    errors
}

fn validate_holiday(holiday: &RawHoliday) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match holiday {
        RawHoliday::Date(value) => {
            if let Err(message) = parse_date(value) {
                errors.push(ValidationError::InvalidDateFormat {
                    value: value.clone(),
                    message,
                });
            }
        }
        RawHoliday::Range { start, end } => match (parse_date(start), parse_date(end)) {
            (Ok(first), Ok(last)) if last < first => {
                errors.push(ValidationError::InvertedHolidayRange {
                    start: start.clone(),
                    end: end.clone(),
                });
            }
            (first, last) => {
                if let Err(message) = first {
                    errors.push(ValidationError::InvalidDateFormat {
                        value: start.clone(),
                        message,
                    });
                }
                if let Err(message) = last {
                    errors.push(ValidationError::InvalidDateFormat {
                        value: end.clone(),
                        message,
                    });
                }
            }
        },
    }

    errors
}

/// Parse HH:MM time format
pub fn parse_time(s: &str) -> Result<WallClock, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        return Err("Expected HH:MM format".into());
    }

    let hour: u8 = parts[0]
        .parse()
        .map_err(|_| "Invalid hour".to_string())?;
    let minute: u8 = parts[1]
        .parse()
        .map_err(|_| "Invalid minute".to_string())?;

    if hour >= 24 {
        return Err("Hour must be 0-23".into());
    }
    if minute >= 60 {
        return Err("Minute must be 0-59".into());
    }

    WallClock::new(hour, minute).ok_or_else(|| "Invalid time".to_string())
}

/// Parse YYYY-MM-DD date format
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| e.to_string())
}

/// Parse days specification
pub fn parse_days(days: &RawDays) -> Result<u8, String> {
    match days {
        RawDays::Preset(preset) => match preset.to_lowercase().as_str() {
            "all" | "every" | "daily" => Ok(0x7F),
            "weekdays" => Ok(0x1F), // Mon-Fri
            "weekends" => Ok(0x60), // Sat-Sun
            "none" => Ok(0),
            other => Err(format!("Unknown day preset: {}", other)),
        },
        RawDays::List(list) => {
            let mut mask = 0u8;
            for day in list {
                let bit = match day.to_lowercase().as_str() {
                    "mon" | "monday" => 1 << 0,
                    "tue" | "tuesday" => 1 << 1,
                    "wed" | "wednesday" => 1 << 2,
                    "thu" | "thursday" => 1 << 3,
                    "fri" | "friday" => 1 << 4,
                    "sat" | "saturday" => 1 << 5,
                    "sun" | "sunday" => 1 << 6,
                    other => return Err(format!("Unknown day: {}", other)),
                };
                mask |= bit;
            }
            Ok(mask)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_rules() -> RawTaxRules {
        RawTaxRules {
            rules_version: 1,
            daily_cap: 60,
            window_minutes: 60,
            toll_free_days: RawDays::Preset("weekends".into()),
            toll_free_vehicles: vec!["motorcycle".into()],
            fee_bands: vec![],
            holidays: vec![],
        }
    }

    fn band(start: &str, end: &str, fee: u32) -> RawFeeBand {
        RawFeeBand {
            start: start.into(),
            end: end.into(),
            fee,
        }
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("14:30").unwrap(), WallClock::new(14, 30).unwrap());
        assert_eq!(parse_time("00:00").unwrap(), WallClock::MIDNIGHT);
        assert_eq!(parse_time("23:59").unwrap(), WallClock::LAST_MINUTE);

        assert!(parse_time("24:00").is_err());
        assert!(parse_time("12:60").is_err());
        assert!(parse_time("invalid").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2013-07-01").unwrap(),
            NaiveDate::from_ymd_opt(2013, 7, 1).unwrap()
        );
        assert!(parse_date("2013-02-30").is_err());
        assert!(parse_date("01/07/2013").is_err());
    }

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_days(&RawDays::Preset("weekends".into())).unwrap(), 0x60);
        assert_eq!(parse_days(&RawDays::Preset("none".into())).unwrap(), 0);
        assert_eq!(
            parse_days(&RawDays::List(vec!["sat".into(), "Sunday".into()])).unwrap(),
            0x60
        );
        assert!(parse_days(&RawDays::Preset("holidays".into())).is_err());
    }

    #[test]
    fn test_valid_rules_have_no_errors() {
        let mut rules = raw_rules();
        rules.fee_bands = vec![band("06:00", "06:29", 8), band("06:30", "06:59", 13)];
        rules.holidays = vec![
            RawHoliday::Date("2013-01-01".into()),
            RawHoliday::Range {
                start: "2013-07-01".into(),
                end: "2013-07-31".into(),
            },
        ];

        assert!(validate_rules(&rules).is_empty());
    }

    #[test]
    fn test_overlapping_bands_detected() {
        let mut rules = raw_rules();
        rules.fee_bands = vec![band("06:00", "06:30", 8), band("06:30", "06:59", 13)];

        let errors = validate_rules(&rules);
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::OverlappingFeeBands { .. })));
    }

    #[test]
    fn test_inverted_band_detected() {
        let mut rules = raw_rules();
        rules.fee_bands = vec![band("18:30", "05:59", 0)];

        let errors = validate_rules(&rules);
        assert!(matches!(errors[0], ValidationError::InvertedFeeBand { .. }));
    }

    #[test]
    fn test_bad_band_times_reported_individually() {
        let mut rules = raw_rules();
        rules.fee_bands = vec![band("6am", "25:00", 8)];

        let errors = validate_rules(&rules);
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ValidationError::InvalidTimeFormat { .. })));
    }

    #[test]
    fn test_unknown_vehicle_and_zero_window() {
        let mut rules = raw_rules();
        rules.window_minutes = 0;
        rules.toll_free_vehicles.push("hovercraft".into());

        let errors = validate_rules(&rules);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::ZeroWindow)));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::UnknownVehicleCategory(c) if c == "hovercraft")));
    }

    #[test]
    fn test_daily_cap_above_maximum_rejected() {
        let mut rules = raw_rules();
        rules.daily_cap = 1000;

        let errors = validate_rules(&rules);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ValidationError::DailyCapTooHigh { cap: 1000, max: 60 }
        ));

        rules.daily_cap = 60;
        assert!(validate_rules(&rules).is_empty());
    }

    #[test]
    fn test_oversized_fee_rejected() {
        let mut rules = raw_rules();
        rules.fee_bands = vec![band("06:00", "18:29", 3_000_000_000)];

        let errors = validate_rules(&rules);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ValidationError::FeeTooHigh { fee: 3_000_000_000, .. }
        ));
    }

    #[test]
    fn test_bad_holidays_detected() {
        let mut rules = raw_rules();
        rules.holidays = vec![
            RawHoliday::Date("2013-13-01".into()),
            RawHoliday::Range {
                start: "2013-07-31".into(),
                end: "2013-07-01".into(),
            },
        ];

        let errors = validate_rules(&rules);
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ValidationError::InvalidDateFormat { .. }));
        assert!(matches!(errors[1], ValidationError::InvertedHolidayRange { .. }));
    }
}
