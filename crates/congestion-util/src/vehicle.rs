//! Vehicle categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a vehicle passing a toll station.
///
/// The six named exempt categories are the only toll-free ones; everything
/// else, including unrecognized labels kept in `Other`, is taxable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VehicleCategory {
    Motorcycle,
    Tractor,
    Emergency,
    Diplomat,
    Foreign,
    Military,
    Car,
    Other(String),
}

impl VehicleCategory {
    /// Categories that never pay congestion tax
    pub const EXEMPT: [VehicleCategory; 6] = [
        VehicleCategory::Motorcycle,
        VehicleCategory::Tractor,
        VehicleCategory::Emergency,
        VehicleCategory::Diplomat,
        VehicleCategory::Foreign,
        VehicleCategory::Military,
    ];

    /// Parse a category label. Matching is case-sensitive; each known
    /// category accepts its lowercase and its capitalized spelling.
    pub fn from_label(label: &str) -> Self {
        match label {
            "motorcycle" | "Motorcycle" => Self::Motorcycle,
            "tractor" | "Tractor" => Self::Tractor,
            "emergency" | "Emergency" => Self::Emergency,
            "diplomat" | "Diplomat" => Self::Diplomat,
            "foreign" | "Foreign" => Self::Foreign,
            "military" | "Military" => Self::Military,
            "car" | "Car" => Self::Car,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Motorcycle => "motorcycle",
            Self::Tractor => "tractor",
            Self::Emergency => "emergency",
            Self::Diplomat => "diplomat",
            Self::Foreign => "foreign",
            Self::Military => "military",
            Self::Car => "car",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for VehicleCategory {
    fn from(s: String) -> Self {
        Self::from_label(&s)
    }
}

impl From<&str> for VehicleCategory {
    fn from(s: &str) -> Self {
        Self::from_label(s)
    }
}

impl From<VehicleCategory> for String {
    fn from(category: VehicleCategory) -> Self {
        category.label().to_string()
    }
}

/// A vehicle as seen by the tax engine: only its category matters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vehicle {
    pub category: Option<VehicleCategory>,
}

impl Vehicle {
    pub fn new(category: VehicleCategory) -> Self {
        Self {
            category: Some(category),
        }
    }

    /// A vehicle whose category was not supplied
    pub fn unknown() -> Self {
        Self { category: None }
    }

    pub fn from_label(label: Option<&str>) -> Self {
        Self {
            category: label.map(VehicleCategory::from_label),
        }
    }

    pub fn car() -> Self {
        Self::new(VehicleCategory::Car)
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.category {
            Some(category) => write!(f, "{}", category),
            None => f.write_str("<unknown>"),
        }
    }
}
