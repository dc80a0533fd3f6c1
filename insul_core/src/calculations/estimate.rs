//! # Estimate
//!
//! Runs every calculator over one job's inputs and assembles the report.
//! The run is a single forward pass: validate, look up materials, compute
//! areas, usage, batts and labour, aggregate, build the report. Any failure
//! aborts the run; there is no partial report.
//!
//! ## Example
//!
//! ```rust
//! use insul_core::calculations::estimate::{calculate, EstimateInput};
//! use insul_core::materials::MaterialCatalog;
//!
//! let input = EstimateInput::sample();
//! let report = calculate(&input, &MaterialCatalog::standard()).unwrap();
//! assert_eq!(report.wall.usage.bags, 4);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::materials::{MaterialCatalog, MaterialChoice, RValue};
use crate::report::{
    CathedralEstimate, CeilingEstimate, CostBreakdown, EstimateReport, SectionEstimate, WallEstimate,
};

use super::area::{self, CathedralSection};
use super::batts;
use super::consumption::{self, CATHEDRAL_COVERAGE_BUFFER, NO_BUFFER};
use super::labour::{self, LabourRates};
use super::totals;

/// Wall insulation input.
///
/// ## JSON Example
///
/// ```json
/// {
///   "linear_ft": 40.0,
///   "height_ft": 8.0,
///   "stud_spacing_in": 16,
///   "material": { "r_value": "R12", "width_in": 15 },
///   "price_per_bag": 50.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallInput {
    /// Total wall run (ft)
    pub linear_ft: f64,
    /// Wall height (ft)
    pub height_ft: f64,
    /// Stud spacing on center (in), typically 16 or 24
    pub stud_spacing_in: u32,
    /// Batt product
    pub material: MaterialChoice,
    /// Price per bag ($)
    pub price_per_bag: f64,
}

/// Cathedral ceiling input: one product and spacing shared by all sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CathedralInput {
    /// Batt product
    pub material: MaterialChoice,
    /// Price per bag ($)
    pub price_per_bag: f64,
    /// Truss/rafter spacing on center (in), typically 16 or 24
    pub truss_spacing_in: u32,
    /// Sections in display order (may be empty)
    #[serde(default)]
    pub sections: Vec<CathedralSection>,
}

/// Blown-in ceiling input.
///
/// Coverage and price are optional; a zero coverage means no blown-in
/// product was configured and the ceiling carries no material cost.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CeilingInput {
    /// Gross blown-in area (sq ft)
    pub gross_sqft: f64,
    /// Vaulted/cathedral area excluded from the blown-in area (sq ft)
    #[serde(default)]
    pub vaulted_exclusion_sqft: f64,
    /// Square feet covered by one bag of blown-in product (0 = not configured)
    #[serde(default)]
    pub coverage_per_bag_sqft: f64,
    /// Price per bag of blown-in product ($)
    #[serde(default)]
    pub price_per_bag: f64,
}

/// Everything one estimate needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateInput {
    pub wall: WallInput,
    pub cathedral: CathedralInput,
    #[serde(default)]
    pub ceiling: CeilingInput,
    #[serde(default)]
    pub labour: LabourRates,
}

impl EstimateInput {
    /// A small, realistic job used for new job files and examples
    pub fn sample() -> Self {
        EstimateInput {
            wall: WallInput {
                linear_ft: 40.0,
                height_ft: 8.0,
                stud_spacing_in: 16,
                material: MaterialChoice::new(RValue::R12, 15),
                price_per_bag: 50.0,
            },
            cathedral: CathedralInput {
                material: MaterialChoice::new(RValue::R14, 23),
                price_per_bag: 55.0,
                truss_spacing_in: 24,
                sections: vec![CathedralSection::new(20.0, 24.0, 8.0)],
            },
            ceiling: CeilingInput {
                gross_sqft: 1000.0,
                vaulted_exclusion_sqft: 480.0,
                coverage_per_bag_sqft: 40.0,
                price_per_bag: 30.0,
            },
            labour: LabourRates {
                wall_rate_per_sqft: 0.45,
                ceiling_hourly_rate: 65.0,
                ceiling_hours: 4.0,
                ceiling_flat_surcharge: 75.0,
                cathedral_hourly_rate: 70.0,
                cathedral_hours_per_section: 3.0,
                cathedral_flat_surcharge_per_section: 50.0,
            },
        }
    }

    /// Validate input parameters.
    ///
    /// Only non-negativity (and finiteness) is checked, plus the zero
    /// spacings that would otherwise divide by zero. Catalog membership is
    /// checked during [`calculate`].
    pub fn validate(&self) -> EstimateResult<()> {
        check_dimension("wall.linear_ft", self.wall.linear_ft)?;
        check_dimension("wall.height_ft", self.wall.height_ft)?;
        check_amount("wall.price_per_bag", self.wall.price_per_bag)?;
        check_spacing("wall.stud_spacing_in", self.wall.stud_spacing_in)?;

        check_amount("cathedral.price_per_bag", self.cathedral.price_per_bag)?;
        check_spacing("cathedral.truss_spacing_in", self.cathedral.truss_spacing_in)?;
        for (i, section) in self.cathedral.sections.iter().enumerate() {
            check_dimension(&format!("cathedral.sections[{}].length_ft", i), section.length_ft)?;
            check_dimension(&format!("cathedral.sections[{}].base_width_ft", i), section.base_width_ft)?;
            check_dimension(&format!("cathedral.sections[{}].rise_ft", i), section.rise_ft)?;
        }

        check_dimension("ceiling.gross_sqft", self.ceiling.gross_sqft)?;
        check_dimension("ceiling.vaulted_exclusion_sqft", self.ceiling.vaulted_exclusion_sqft)?;
        if self.ceiling.coverage_per_bag_sqft < 0.0 || self.ceiling.coverage_per_bag_sqft.is_nan() {
            return Err(EstimateError::invalid_coverage("ceiling", self.ceiling.coverage_per_bag_sqft));
        }
        check_amount("ceiling.price_per_bag", self.ceiling.price_per_bag)?;

        let rates = &self.labour;
        check_amount("labour.wall_rate_per_sqft", rates.wall_rate_per_sqft)?;
        check_amount("labour.ceiling_hourly_rate", rates.ceiling_hourly_rate)?;
        check_amount("labour.ceiling_hours", rates.ceiling_hours)?;
        check_amount("labour.ceiling_flat_surcharge", rates.ceiling_flat_surcharge)?;
        check_amount("labour.cathedral_hourly_rate", rates.cathedral_hourly_rate)?;
        check_amount("labour.cathedral_hours_per_section", rates.cathedral_hours_per_section)?;
        check_amount(
            "labour.cathedral_flat_surcharge_per_section",
            rates.cathedral_flat_surcharge_per_section,
        )?;
        Ok(())
    }
}

fn check_dimension(field: &str, value: f64) -> EstimateResult<()> {
    if value.is_nan() || value.is_infinite() {
        return Err(EstimateError::invalid_input(field, value.to_string(), "Dimension must be a finite number"));
    }
    if value < 0.0 {
        return Err(EstimateError::negative_dimension(field, value));
    }
    Ok(())
}

fn check_amount(field: &str, value: f64) -> EstimateResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EstimateError::invalid_input(
            field,
            value.to_string(),
            "Value must be a non-negative number",
        ));
    }
    Ok(())
}

fn check_spacing(field: &str, spacing_in: u32) -> EstimateResult<()> {
    if spacing_in == 0 {
        return Err(EstimateError::invalid_input(field, "0", "Framing spacing must be positive"));
    }
    Ok(())
}

/// Run a complete estimate against `catalog`.
///
/// # Returns
///
/// * `Ok(EstimateReport)` - The finished, immutable report
/// * `Err(EstimateError)` - Invalid input, unknown material or unusable coverage
pub fn calculate(input: &EstimateInput, catalog: &MaterialCatalog) -> EstimateResult<EstimateReport> {
    let _span = tracing::info_span!("estimate", sections = input.cathedral.sections.len()).entered();

    input.validate()?;

    let wall_spec = input.wall.material.resolve(catalog)?;
    let cathedral_spec = input.cathedral.material.resolve(catalog)?;

    // Walls
    let wall_area = area::wall_area(input.wall.linear_ft, input.wall.height_ft);
    let wall_usage = consumption::material_usage("wall", wall_area.0, &wall_spec, input.wall.price_per_bag, NO_BUFFER)?;
    let wall_batts = batts::batt_count(input.wall.linear_ft, input.wall.stud_spacing_in)?;

    // Cathedrals
    let sections = &input.cathedral.sections;
    let cathedral_area = area::total_cathedral_area(sections);
    let cathedral_usage = consumption::material_usage(
        "cathedral",
        cathedral_area.0,
        &cathedral_spec,
        input.cathedral.price_per_bag,
        CATHEDRAL_COVERAGE_BUFFER,
    )?;
    let section_batts = batts::cathedral_batt_counts(sections, input.cathedral.truss_spacing_in)?;
    let section_estimates: Vec<SectionEstimate> = sections
        .iter()
        .zip(&section_batts)
        .map(|(section, &batts)| SectionEstimate {
            section: *section,
            slope_ft: section.slope_ft(),
            area_sqft: section.area(),
            batts,
        })
        .collect();
    let total_batts = section_batts
        .iter()
        .try_fold(0u32, |acc, &n| acc.checked_add(n))
        .ok_or_else(|| {
            EstimateError::invalid_input("cathedral batts", format!("{} sections", sections.len()), "Batt total is out of range")
        })?;

    // Blown-in ceiling
    let ceiling_area = area::ceiling_net_area(input.ceiling.gross_sqft, input.ceiling.vaulted_exclusion_sqft);
    let ceiling_usage = consumption::ceiling_usage(
        ceiling_area.0,
        input.ceiling.coverage_per_bag_sqft,
        input.ceiling.price_per_bag,
    )?;

    // Labour and totals
    let labour = labour::calculate(&input.labour, wall_area.0, cathedral_area.0, sections.len());
    let totals = totals::aggregate(wall_usage.cost, cathedral_usage.cost, ceiling_usage.cost, &labour);

    let cost_breakdown = CostBreakdown::from_costs(wall_usage.cost, cathedral_usage.cost, ceiling_usage.cost, &labour);

    tracing::info!(
        material = totals.material.0,
        labour = totals.labour.0,
        total = totals.with_tax_and_buffer.0,
        "estimate complete"
    );

    Ok(EstimateReport {
        wall: WallEstimate {
            material: wall_spec,
            area_sqft: wall_area,
            usage: wall_usage,
            batts: wall_batts,
        },
        cathedral: CathedralEstimate {
            material: cathedral_spec,
            total_batts,
            sections: section_estimates,
            total_area_sqft: cathedral_area,
            usage: cathedral_usage,
        },
        ceiling: CeilingEstimate {
            net_area_sqft: ceiling_area,
            usage: ceiling_usage,
        },
        labour,
        cost_breakdown,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialSpec;
    use crate::units::Dollars;

    fn zero_rates() -> LabourRates {
        LabourRates::default()
    }

    fn wall_only() -> EstimateInput {
        EstimateInput {
            wall: WallInput {
                linear_ft: 40.0,
                height_ft: 8.0,
                stud_spacing_in: 16,
                material: MaterialChoice::new(RValue::R12, 15),
                price_per_bag: 50.0,
            },
            cathedral: CathedralInput {
                material: MaterialChoice::new(RValue::R14, 23),
                price_per_bag: 60.0,
                truss_spacing_in: 24,
                sections: Vec::new(),
            },
            ceiling: CeilingInput::default(),
            labour: zero_rates(),
        }
    }

    #[test]
    fn test_wall_scenario() {
        let report = calculate(&wall_only(), &MaterialCatalog::standard()).unwrap();
        assert_eq!(report.wall.area_sqft.0, 320.0);
        assert_eq!(report.wall.usage.bags, 4);
        assert_eq!(report.wall.usage.pieces, 80);
        assert_eq!(report.wall.usage.cost, Dollars(200.0));
        assert_eq!(report.wall.batts, 30);
    }

    #[test]
    fn test_cathedral_scenario() {
        let mut input = wall_only();
        input.cathedral.sections = vec![CathedralSection::new(20.0, 24.0, 8.0)];
        let report = calculate(&input, &MaterialCatalog::standard()).unwrap();

        assert!((report.cathedral.total_area_sqft.0 - 576.89).abs() < 0.01);
        assert!((report.cathedral.sections[0].slope_ft - 14.42).abs() < 0.01);
        assert_eq!(report.cathedral.usage.bags, 5);
        assert_eq!(report.cathedral.usage.cost, Dollars(300.0));
        assert_eq!(report.cathedral.sections[0].batts, 12);
        assert_eq!(report.cathedral.total_batts, 12);
    }

    #[test]
    fn test_fully_vaulted_ceiling_needs_no_bags() {
        let mut input = wall_only();
        input.ceiling = CeilingInput {
            gross_sqft: 1000.0,
            vaulted_exclusion_sqft: 1000.0,
            coverage_per_bag_sqft: 40.0,
            price_per_bag: 30.0,
        };
        let report = calculate(&input, &MaterialCatalog::standard()).unwrap();
        assert_eq!(report.ceiling.net_area_sqft.0, 0.0);
        assert_eq!(report.ceiling.usage.bags, 0);

        input.ceiling.coverage_per_bag_sqft = 0.0;
        let report = calculate(&input, &MaterialCatalog::standard()).unwrap();
        assert_eq!(report.ceiling.usage.bags, 0);
    }

    #[test]
    fn test_no_sections_reduces_to_wall_and_ceiling() {
        let mut input = wall_only();
        input.labour = LabourRates {
            wall_rate_per_sqft: 0.5,
            ceiling_hourly_rate: 60.0,
            ceiling_hours: 2.0,
            ceiling_flat_surcharge: 30.0,
            cathedral_hourly_rate: 80.0,
            cathedral_hours_per_section: 5.0,
            cathedral_flat_surcharge_per_section: 100.0,
        };
        let report = calculate(&input, &MaterialCatalog::standard()).unwrap();

        assert_eq!(report.cathedral.total_area_sqft.0, 0.0);
        assert_eq!(report.cathedral.usage.bags, 0);
        assert_eq!(report.labour.cathedral_surcharge, Dollars(0.0));
        assert_eq!(report.totals.material, Dollars(200.0));
        // wall 160 + area 160 + ceiling 150
        assert_eq!(report.totals.labour, Dollars(470.0));
    }

    #[test]
    fn test_totals_consistency() {
        let report = calculate(&EstimateInput::sample(), &MaterialCatalog::standard()).unwrap();
        let t = report.totals;
        assert_eq!(t.with_tax_and_buffer.0, (t.material.0 + t.labour.0) * 1.05 * 1.10);
        assert!((report.cost_breakdown.total().0 - (t.material.0 + t.labour.0)).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_material_aborts() {
        let mut input = wall_only();
        input.wall.material = MaterialChoice::new(RValue::R40, 15);
        let err = calculate(&input, &MaterialCatalog::standard()).unwrap_err();
        assert_eq!(err, EstimateError::unknown_material("R40", 15));
    }

    #[test]
    fn test_injected_catalog_drives_bag_counts() {
        let catalog = MaterialCatalog::from_specs([
            MaterialSpec {
                r_value: RValue::R12,
                width_in: 15,
                coverage_per_bag_sqft: 10.0,
                pieces_per_bag: 1,
            },
            MaterialSpec {
                r_value: RValue::R14,
                width_in: 23,
                coverage_per_bag_sqft: 10.0,
                pieces_per_bag: 1,
            },
        ])
        .unwrap();
        let report = calculate(&wall_only(), &catalog).unwrap();
        assert_eq!(report.wall.usage.bags, 32);
        assert_eq!(report.wall.usage.pieces, 32);
    }

    #[test]
    fn test_negative_dimensions_rejected() {
        let mut input = wall_only();
        input.wall.height_ft = -8.0;
        assert_eq!(
            calculate(&input, &MaterialCatalog::standard()).unwrap_err(),
            EstimateError::negative_dimension("wall.height_ft", -8.0)
        );

        let mut input = wall_only();
        input.cathedral.sections = vec![CathedralSection::new(10.0, 12.0, -1.0)];
        let err = calculate(&input, &MaterialCatalog::standard()).unwrap_err();
        assert_eq!(err, EstimateError::negative_dimension("cathedral.sections[0].rise_ft", -1.0));
    }

    #[test]
    fn test_oversized_job_is_an_error_not_a_panic() {
        let mut input = wall_only();
        input.wall.linear_ft = 1e7;
        input.wall.height_ft = 1e4;
        let err = calculate(&input, &MaterialCatalog::standard()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        // each section alone fits, the summed batt count does not
        let mut input = wall_only();
        input.cathedral.sections = vec![CathedralSection::new(0.001, 3e9, 0.0); 3];
        let err = calculate(&input, &MaterialCatalog::standard()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_negative_price_and_zero_spacing_rejected() {
        let mut input = wall_only();
        input.wall.price_per_bag = -1.0;
        assert_eq!(input.validate().unwrap_err().error_code(), "INVALID_INPUT");

        let mut input = wall_only();
        input.cathedral.truss_spacing_in = 0;
        assert_eq!(input.validate().unwrap_err().error_code(), "INVALID_INPUT");

        let mut input = wall_only();
        input.ceiling.coverage_per_bag_sqft = -3.0;
        assert_eq!(input.validate().unwrap_err().error_code(), "INVALID_COVERAGE");
    }

    #[test]
    fn test_input_json_defaults() {
        let json = r#"{
            "wall": {
                "linear_ft": 40.0, "height_ft": 8.0, "stud_spacing_in": 16,
                "material": { "r_value": "R12", "width_in": 15 }, "price_per_bag": 50.0
            },
            "cathedral": {
                "material": { "r_value": "R14", "width_in": 23 },
                "price_per_bag": 60.0, "truss_spacing_in": 24
            }
        }"#;
        let input: EstimateInput = serde_json::from_str(json).unwrap();
        assert!(input.cathedral.sections.is_empty());
        assert_eq!(input.ceiling, CeilingInput::default());
        assert_eq!(input, wall_only());
    }
}
