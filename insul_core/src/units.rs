//! # Unit Types
//!
//! Lightweight newtype wrappers for the units an insulation estimate deals in.
//! They serialize as bare numbers so job files stay plain JSON.
//!
//! ## US Customary Units
//!
//! - Length: feet (ft), inches (in)
//! - Area: square feet (sq ft)
//! - Money: US dollars
//!
//! ## Example
//!
//! ```rust
//! use insul_core::units::{Feet, Inches};
//!
//! let spacing = Inches(16.0);
//! let spacing_ft: Feet = spacing.into();
//! assert!((spacing_ft.0 - 1.3333).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, Mul};

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

impl Mul for Feet {
    type Output = SquareFeet;

    fn mul(self, rhs: Feet) -> SquareFeet {
        SquareFeet(self.0 * rhs.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareFeet(pub f64);

impl Add for SquareFeet {
    type Output = SquareFeet;

    fn add(self, rhs: SquareFeet) -> SquareFeet {
        SquareFeet(self.0 + rhs.0)
    }
}

impl Sum for SquareFeet {
    fn sum<I: Iterator<Item = SquareFeet>>(iter: I) -> Self {
        iter.fold(SquareFeet(0.0), |acc, a| acc + a)
    }
}

// ============================================================================
// Money
// ============================================================================

/// Amount in US dollars
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dollars(pub f64);

impl Add for Dollars {
    type Output = Dollars;

    fn add(self, rhs: Dollars) -> Dollars {
        Dollars(self.0 + rhs.0)
    }
}

impl Sum for Dollars {
    fn sum<I: Iterator<Item = Dollars>>(iter: I) -> Self {
        iter.fold(Dollars(0.0), |acc, d| acc + d)
    }
}

impl std::fmt::Display for Dollars {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
