//! # Materials Catalog
//!
//! Batt insulation products identified by R-value tier and batt width.
//! Each (R-value, width) pair yields a fixed coverage and piece count per bag.
//!
//! Lighter tiers (R12-R22) come in 15"/23" widths for 16"/24" o.c. framing,
//! heavier tiers (R28-R40) in 16"/24" widths. The width sets are data, not a
//! rule, so lookups fail for any pair the catalog does not list.
//!
//! ## Example
//!
//! ```rust
//! use insul_core::materials::{MaterialCatalog, RValue};
//!
//! let catalog = MaterialCatalog::standard();
//! let spec = catalog.lookup(RValue::R12, 15).unwrap();
//! assert_eq!(spec.coverage_per_bag_sqft, 100.0);
//! assert_eq!(spec.pieces_per_bag, 20);
//!
//! assert!(catalog.lookup(RValue::R40, 15).is_err());
//! ```

pub mod catalog;

pub use catalog::{MaterialCatalog, MaterialSpec};

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};

/// R-value tiers carried by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RValue {
    R12,
    R14,
    R20,
    R22,
    R28,
    R31,
    R40,
}

impl RValue {
    /// All tiers in ascending thermal resistance
    pub const ALL: [RValue; 7] = [
        RValue::R12,
        RValue::R14,
        RValue::R20,
        RValue::R22,
        RValue::R28,
        RValue::R31,
        RValue::R40,
    ];

    /// Catalog label (e.g., "R12")
    pub fn label(&self) -> &'static str {
        match self {
            RValue::R12 => "R12",
            RValue::R14 => "R14",
            RValue::R20 => "R20",
            RValue::R22 => "R22",
            RValue::R28 => "R28",
            RValue::R31 => "R31",
            RValue::R40 => "R40",
        }
    }

    /// Parse from common string representations ("R12", "r-12", "12")
    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        let normalized = s.trim().to_uppercase().replace(['-', ' ', '_'], "");
        let digits = normalized.strip_prefix('R').unwrap_or(&normalized);
        match digits {
            "12" => Ok(RValue::R12),
            "14" => Ok(RValue::R14),
            "20" => Ok(RValue::R20),
            "22" => Ok(RValue::R22),
            "28" => Ok(RValue::R28),
            "31" => Ok(RValue::R31),
            "40" => Ok(RValue::R40),
            _ => Err(EstimateError::unknown_material(s.trim(), 0)),
        }
    }
}

impl std::fmt::Display for RValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for RValue {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RValue::from_str_flexible(s)
    }
}

/// A product selection inside an estimate input.
///
/// ## JSON Example
///
/// ```json
/// { "r_value": "R14", "width_in": 23 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialChoice {
    /// R-value tier
    pub r_value: RValue,
    /// Batt width in inches
    pub width_in: u32,
}

impl MaterialChoice {
    pub fn new(r_value: RValue, width_in: u32) -> Self {
        MaterialChoice { r_value, width_in }
    }

    /// Resolve this choice against a catalog
    pub fn resolve(&self, catalog: &MaterialCatalog) -> EstimateResult<MaterialSpec> {
        catalog.lookup(self.r_value, self.width_in)
    }
}

impl std::fmt::Display for MaterialChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}\"", self.r_value, self.width_in)
    }
}
