//! Congestion tax rules as data
//!
//! Supports TOML rule sets with:
//! - Versioned schema
//! - Time-of-day fee bands
//! - Toll-free weekdays, dates and vehicle categories
//! - Validation with clear error messages
//!
//! The built-in Gothenburg 2013 rules are available without parsing
//! anything via [`TaxRules::gothenburg_2013`].

mod policy;
mod schema;
mod validation;

pub use policy::*;
pub use schema::*;
pub use validation::*;

use thiserror::Error;
use tracing::info;

/// Rule loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported rules version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Current supported rules version
pub const CURRENT_RULES_VERSION: u32 = 1;

/// Parse and validate tax rules from a TOML string
pub fn parse_rules(content: &str) -> ConfigResult<TaxRules> {
    let raw: RawTaxRules = toml::from_str(content)?;
    build_rules(raw)
}

/// Validate already-deserialized raw rules and convert them
pub fn build_rules(raw: RawTaxRules) -> ConfigResult<TaxRules> {
    if raw.rules_version != CURRENT_RULES_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.rules_version));
    }

    let errors = validate_rules(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    let rules = TaxRules::from_raw(raw);
    info!(
        fee_bands = rules.fee_bands.len(),
        holidays = rules.holidays.len(),
        daily_cap = rules.daily_cap,
        "Tax rules loaded"
    );
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_rules() {
        let rules = parse_rules("rules_version = 1").unwrap();
        assert!(rules.fee_bands.is_empty());
        assert!(rules.holidays.is_empty());
        assert_eq!(rules.daily_cap, 60);
    }

    #[test]
    fn reject_wrong_version() {
        let result = parse_rules("rules_version = 99");
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_invalid_rules() {
        let content = r#"
            rules_version = 1
            window_minutes = 0

            [[fee_bands]]
            start = "07:00"
            end = "06:00"
            fee = 18
        "#;

        match parse_rules(content) {
            Err(ConfigError::ValidationFailed { errors }) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn reject_daily_cap_above_maximum() {
        let content = r#"
            rules_version = 1
            daily_cap = 1000

            [[fee_bands]]
            start = "06:00"
            end = "18:29"
            fee = 18
        "#;

        match parse_rules(content) {
            Err(ConfigError::ValidationFailed { errors }) => {
                assert_eq!(errors.len(), 1);
                assert!(matches!(errors[0], ValidationError::DailyCapTooHigh { cap: 1000, .. }));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn reject_malformed_toml() {
        assert!(matches!(
            parse_rules("rules_version = "),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn build_from_json() {
        let raw: RawTaxRules = serde_json::from_str(
            r#"{
                "rules_version": 1,
                "fee_bands": [{ "start": "07:00", "end": "07:59", "fee": 18 }],
                "holidays": ["2013-01-01"]
            }"#,
        )
        .unwrap();

        let rules = build_rules(raw).unwrap();
        assert_eq!(rules.fee_bands.len(), 1);
        assert_eq!(rules.holidays.len(), 1);
    }
}
