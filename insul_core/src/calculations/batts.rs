//! # Batt Counts
//!
//! Number of stud or truss bays along a run, one batt per bay. This is
//! independent of bag coverage: it counts framing bays, not purchasable units.

use crate::errors::{EstimateError, EstimateResult};
use crate::units::{Feet, Inches};

use super::area::CathedralSection;
use super::consumption::whole_count;

/// Batts across `dimension_ft` at `spacing_in` on center: ceil(dimension / (spacing / 12))
///
/// ```rust
/// use insul_core::calculations::batts::batt_count;
///
/// assert_eq!(batt_count(40.0, 16).unwrap(), 30);
/// assert_eq!(batt_count(40.0, 24).unwrap(), 20);
/// ```
pub fn batt_count(dimension_ft: f64, spacing_in: u32) -> EstimateResult<u32> {
    if spacing_in == 0 {
        return Err(EstimateError::invalid_input(
            "spacing_in",
            "0",
            "Framing spacing must be positive",
        ));
    }
    let spacing_ft: Feet = Inches(f64::from(spacing_in)).into();
    whole_count("batts", dimension_ft / spacing_ft.0)
}

/// Per-section batt counts across each section's base width, in section order
pub fn cathedral_batt_counts(sections: &[CathedralSection], truss_spacing_in: u32) -> EstimateResult<Vec<u32>> {
    sections
        .iter()
        .map(|section| batt_count(section.base_width_ft, truss_spacing_in))
        .collect()
}
