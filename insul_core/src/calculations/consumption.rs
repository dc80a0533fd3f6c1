//! # Material Consumption
//!
//! Converts an area into whole bags, batt pieces and material cost.
//! Bag counts always round up. Sloped surfaces divide by a buffered coverage
//! ([`CATHEDRAL_COVERAGE_BUFFER`]) to absorb angled-cut waste; flat walls use
//! [`NO_BUFFER`].

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::materials::MaterialSpec;
use crate::units::Dollars;

/// Coverage multiplier for flat surfaces
pub const NO_BUFFER: f64 = 1.0;

/// Coverage multiplier for cathedral (sloped) surfaces
pub const CATHEDRAL_COVERAGE_BUFFER: f64 = 1.10;

/// Bags needed to cover `area_sqft`: ceil(area / (coverage x buffer)).
///
/// Fails with `InvalidCoverage` for zero, negative or non-finite coverage and
/// with `InvalidInput` for a non-positive buffer.
///
/// ```rust
/// use insul_core::calculations::consumption::{bags_needed, NO_BUFFER};
///
/// assert_eq!(bags_needed(320.0, 100.0, NO_BUFFER).unwrap(), 4);
/// assert_eq!(bags_needed(300.0, 100.0, NO_BUFFER).unwrap(), 3);
/// assert!(bags_needed(300.0, 0.0, NO_BUFFER).is_err());
/// ```
pub fn bags_needed(area_sqft: f64, coverage_per_bag_sqft: f64, buffer_factor: f64) -> EstimateResult<u32> {
    if !(coverage_per_bag_sqft.is_finite() && coverage_per_bag_sqft > 0.0) {
        return Err(EstimateError::invalid_coverage("bags_needed", coverage_per_bag_sqft));
    }
    if !(buffer_factor.is_finite() && buffer_factor > 0.0) {
        return Err(EstimateError::invalid_input(
            "buffer_factor",
            buffer_factor.to_string(),
            "Buffer factor must be positive",
        ));
    }
    let effective_coverage = coverage_per_bag_sqft * buffer_factor;
    whole_count("bags", area_sqft / effective_coverage)
}

/// Round a quotient up to a whole count, failing instead of saturating when
/// it does not fit in a `u32`
pub(crate) fn whole_count(field: &str, quotient: f64) -> EstimateResult<u32> {
    let rounded = quotient.ceil().max(0.0);
    if !rounded.is_finite() || rounded > f64::from(u32::MAX) {
        return Err(EstimateError::invalid_input(
            field,
            quotient.to_string(),
            "Count is out of range",
        ));
    }
    Ok(rounded as u32)
}

/// Bags, pieces and cost for one surface
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialUsage {
    /// Whole bags to purchase
    pub bags: u32,
    /// Batts supplied by those bags
    pub pieces: u32,
    /// bags x price per bag
    pub cost: Dollars,
}

/// Usage of a catalog product over an area.
///
/// `context` names the surface in the error if the spec's coverage is unusable.
pub fn material_usage(
    context: &str,
    area_sqft: f64,
    spec: &MaterialSpec,
    price_per_bag: f64,
    buffer_factor: f64,
) -> EstimateResult<MaterialUsage> {
    let bags = bags_needed(area_sqft, spec.coverage_per_bag_sqft, buffer_factor).map_err(|e| match e {
        EstimateError::InvalidCoverage { coverage, .. } => EstimateError::invalid_coverage(context, coverage),
        other => other,
    })?;
    let pieces = bags.checked_mul(spec.pieces_per_bag).ok_or_else(|| {
        EstimateError::invalid_input(
            format!("{} pieces", context),
            format!("{} bags x {}", bags, spec.pieces_per_bag),
            "Piece count is out of range",
        )
    })?;
    let usage = MaterialUsage {
        bags,
        pieces,
        cost: Dollars(f64::from(bags) * price_per_bag),
    };
    tracing::debug!(
        surface = context,
        area_sqft,
        coverage = spec.coverage_per_bag_sqft,
        buffer_factor,
        bags = usage.bags,
        pieces = usage.pieces,
        "material usage"
    );
    Ok(usage)
}

/// Blown-in ceiling usage.
///
/// The blown-in product is optional in the input, so a coverage of zero (or
/// less) means "not configured": no bags and no cost, instead of the
/// `InvalidCoverage` every other surface gets. Blown-in has no piece count.
pub fn ceiling_usage(area_sqft: f64, coverage_per_bag_sqft: f64, price_per_bag: f64) -> EstimateResult<MaterialUsage> {
    if coverage_per_bag_sqft <= 0.0 {
        if area_sqft > 0.0 {
            tracing::warn!(area_sqft, "blown-in coverage not configured; ceiling material cost omitted");
        }
        return Ok(MaterialUsage::default());
    }
    let bags = bags_needed(area_sqft, coverage_per_bag_sqft, NO_BUFFER).map_err(|e| match e {
        EstimateError::InvalidCoverage { coverage, .. } => EstimateError::invalid_coverage("ceiling", coverage),
        other => other,
    })?;
    tracing::debug!(area_sqft, coverage = coverage_per_bag_sqft, bags, "ceiling usage");
    Ok(MaterialUsage {
        bags,
        pieces: 0,
        cost: Dollars(f64::from(bags) * price_per_bag),
    })
}
