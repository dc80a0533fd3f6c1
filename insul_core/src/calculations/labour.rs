//! # Labour & Surcharges
//!
//! Labour is priced three ways: per square foot (walls, and walls plus
//! cathedrals), per hour plus a flat fee (blown-in ceiling), and per
//! cathedral section (hourly plus flat, repeated for every section).

use serde::{Deserialize, Serialize};

use crate::units::Dollars;

/// Labour pricing for one job.
///
/// ## JSON Example
///
/// ```json
/// {
///   "wall_rate_per_sqft": 0.45,
///   "ceiling_hourly_rate": 65.0,
///   "ceiling_hours": 4.0,
///   "ceiling_flat_surcharge": 75.0,
///   "cathedral_hourly_rate": 70.0,
///   "cathedral_hours_per_section": 3.0,
///   "cathedral_flat_surcharge_per_section": 50.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabourRates {
    /// Installed rate per square foot, applied to walls and cathedrals
    pub wall_rate_per_sqft: f64,
    /// Blown-in ceiling crew rate ($/hr)
    pub ceiling_hourly_rate: f64,
    /// Blown-in ceiling hours
    pub ceiling_hours: f64,
    /// Flat blown-in ceiling surcharge ($)
    pub ceiling_flat_surcharge: f64,
    /// Cathedral crew rate ($/hr)
    pub cathedral_hourly_rate: f64,
    /// Hours charged per cathedral section
    pub cathedral_hours_per_section: f64,
    /// Flat surcharge per cathedral section ($)
    pub cathedral_flat_surcharge_per_section: f64,
}

/// Labour lines for one estimate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabourCosts {
    /// wall area x wall rate
    pub wall: Dollars,
    /// (wall area + cathedral area) x wall rate
    pub area: Dollars,
    /// ceiling hourly x hours + ceiling flat
    pub ceiling: Dollars,
    /// (cathedral hourly x hours + flat) x section count
    pub cathedral_surcharge: Dollars,
}

impl LabourCosts {
    /// Sum of all four lines
    pub fn total(&self) -> Dollars {
        [self.wall, self.area, self.ceiling, self.cathedral_surcharge]
            .into_iter()
            .sum()
    }
}

/// Price labour for the given areas and section count.
///
/// Note: wall area is charged twice, once in `wall` and again inside `area`.
/// That is the pricing policy the estimator has always used and quotes are
/// compared against it, so it is kept as-is even though it reads like a
/// double count.
pub fn calculate(rates: &LabourRates, wall_area_sqft: f64, cathedral_area_sqft: f64, section_count: usize) -> LabourCosts {
    let wall = wall_area_sqft * rates.wall_rate_per_sqft;
    let area = (wall_area_sqft + cathedral_area_sqft) * rates.wall_rate_per_sqft;
    let ceiling = rates.ceiling_hourly_rate * rates.ceiling_hours + rates.ceiling_flat_surcharge;
    let per_section = rates.cathedral_hourly_rate * rates.cathedral_hours_per_section
        + rates.cathedral_flat_surcharge_per_section;
    let cathedral_surcharge = per_section * section_count as f64;

    tracing::debug!(wall, area, ceiling, cathedral_surcharge, section_count, "labour priced");

    LabourCosts {
        wall: Dollars(wall),
        area: Dollars(area),
        ceiling: Dollars(ceiling),
        cathedral_surcharge: Dollars(cathedral_surcharge),
    }
}
