//! # Estimate Report
//!
//! The immutable result of one estimate run, plus the views renderers consume:
//!
//! - [`CostBreakdown`] - labelled dollar amounts in fixed chart order
//! - [`EstimateReport::summary_text`] - the line-oriented summary used
//!   verbatim on screen and in the PDF
//! - [`EstimateReport::cross_sections`] - per-section profile geometry for
//!   cathedral diagrams
//!
//! ## Summary Layout
//!
//! ```text
//! Materials Summary:
//!   Wall:      320.0 sq ft → 4 bags (80 pcs) = $200.00
//!   ...
//!
//! Labour & Surcharges:
//!   ...
//!
//! Batt Counts:
//!   ...
//!
//! Totals:
//!   ...
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::area::CathedralSection;
use crate::calculations::consumption::MaterialUsage;
use crate::calculations::labour::LabourCosts;
use crate::calculations::totals::Totals;
use crate::materials::MaterialSpec;
use crate::units::{Dollars, SquareFeet};

/// Default file name for exported reports
pub const DEFAULT_ARTIFACT_NAME: &str = "estimate_output.pdf";

/// Summary section headings, in output order
pub const SUMMARY_HEADINGS: [&str; 4] = ["Materials Summary:", "Labour & Surcharges:", "Batt Counts:", "Totals:"];

// Cost breakdown labels, in chart order
pub const WALL_MATERIAL: &str = "Wall Mat";
pub const CATHEDRAL_MATERIAL: &str = "Cat Mat";
pub const CEILING_MATERIAL: &str = "Ceil Mat";
pub const WALL_LABOUR: &str = "Wall Labour";
pub const AREA_LABOUR: &str = "Area Labour";
pub const CEILING_LABOUR: &str = "Ceil Labour";
pub const CATHEDRAL_SURCHARGE: &str = "Cat Surcharge";

/// Wall results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallEstimate {
    pub material: MaterialSpec,
    pub area_sqft: SquareFeet,
    pub usage: MaterialUsage,
    /// Stud bays along the wall run
    pub batts: u32,
}

/// Results for one cathedral section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionEstimate {
    pub section: CathedralSection,
    pub slope_ft: f64,
    pub area_sqft: SquareFeet,
    /// Truss bays across the base width
    pub batts: u32,
}

/// Cathedral results across all sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CathedralEstimate {
    pub material: MaterialSpec,
    /// Per-section results in input order
    pub sections: Vec<SectionEstimate>,
    pub total_area_sqft: SquareFeet,
    /// Usage with the sloped-surface coverage buffer applied
    pub usage: MaterialUsage,
    pub total_batts: u32,
}

/// Blown-in ceiling results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeilingEstimate {
    /// Gross area less vaulted exclusion, never negative
    pub net_area_sqft: SquareFeet,
    /// Bags and cost (pieces are always zero for blown-in)
    pub usage: MaterialUsage,
}

/// One labelled amount in the cost breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    pub label: String,
    pub amount: Dollars,
}

/// Labelled cost categories in display order.
///
/// Serializes as an ordered list so JSON consumers keep the chart order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostBreakdown {
    lines: Vec<CostLine>,
}

impl CostBreakdown {
    /// Build the standard seven-line breakdown
    pub fn from_costs(wall: Dollars, cathedral: Dollars, ceiling: Dollars, labour: &LabourCosts) -> Self {
        let mut breakdown = CostBreakdown::default();
        breakdown.push(WALL_MATERIAL, wall);
        breakdown.push(CATHEDRAL_MATERIAL, cathedral);
        breakdown.push(CEILING_MATERIAL, ceiling);
        breakdown.push(WALL_LABOUR, labour.wall);
        breakdown.push(AREA_LABOUR, labour.area);
        breakdown.push(CEILING_LABOUR, labour.ceiling);
        breakdown.push(CATHEDRAL_SURCHARGE, labour.cathedral_surcharge);
        breakdown
    }

    fn push(&mut self, label: &str, amount: Dollars) {
        self.lines.push(CostLine {
            label: label.to_string(),
            amount,
        });
    }

    /// Lines in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &CostLine> {
        self.lines.iter()
    }

    /// Amount for a label, if present
    pub fn get(&self, label: &str) -> Option<Dollars> {
        self.lines.iter().find(|l| l.label == label).map(|l| l.amount)
    }

    /// Largest single amount (zero when empty), used to scale charts
    pub fn max_amount(&self) -> Dollars {
        Dollars(self.lines.iter().map(|l| l.amount.0).fold(0.0, f64::max))
    }

    /// Pre-tax sum of every line
    pub fn total(&self) -> Dollars {
        self.lines.iter().map(|l| l.amount).sum()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cathedral cross-section handed to diagram renderers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    pub base_width_ft: f64,
    pub rise_ft: f64,
}

impl CrossSection {
    /// Gable profile: left wall top, ridge, right wall top (x, y in ft)
    pub fn profile_points(&self) -> [(f64, f64); 3] {
        [
            (0.0, 0.0),
            (self.base_width_ft / 2.0, self.rise_ft),
            (self.base_width_ft, 0.0),
        ]
    }
}

/// Complete result of one estimate run.
///
/// Produced by [`calculate`](crate::calculations::estimate::calculate). The
/// fields are public and the type deserializes, so a report edited or loaded
/// from JSON is not re-checked against the totals it carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateReport {
    pub wall: WallEstimate,
    pub cathedral: CathedralEstimate,
    pub ceiling: CeilingEstimate,
    pub labour: LabourCosts,
    pub cost_breakdown: CostBreakdown,
    pub totals: Totals,
}

impl EstimateReport {
    /// Summary lines, blank-line separated between sections
    pub fn summary_lines(&self) -> Vec<String> {
        let wall = &self.wall;
        let cathedral = &self.cathedral;
        let ceiling = &self.ceiling;
        let labour = &self.labour;
        let totals = &self.totals;

        vec![
            SUMMARY_HEADINGS[0].to_string(),
            format!(
                "  Wall:      {:.1} sq ft → {} bags ({} pcs) = {}",
                wall.area_sqft.0, wall.usage.bags, wall.usage.pieces, wall.usage.cost
            ),
            format!(
                "  Cathedral: {:.1} sq ft → {} bags ({} pcs) = {}",
                cathedral.total_area_sqft.0, cathedral.usage.bags, cathedral.usage.pieces, cathedral.usage.cost
            ),
            format!(
                "  Ceiling:   {:.1} sq ft → {} bags = {}",
                ceiling.net_area_sqft.0, ceiling.usage.bags, ceiling.usage.cost
            ),
            String::new(),
            SUMMARY_HEADINGS[1].to_string(),
            format!("  Wall Labour:                  {}", labour.wall),
            format!("  Area Labour (Wall+Cathedral): {}", labour.area),
            format!("  Ceiling Labour:               {}", labour.ceiling),
            format!("  Cathedral Surcharge:          {}", labour.cathedral_surcharge),
            String::new(),
            SUMMARY_HEADINGS[2].to_string(),
            format!("  Wall batts: {} pcs", wall.batts),
            format!("  Cathedral batts: {} pcs", cathedral.total_batts),
            String::new(),
            SUMMARY_HEADINGS[3].to_string(),
            format!("  Material Total:       {}", totals.material),
            format!("  Labour Total:         {}", totals.labour),
            format!("  Total w/ Tax:         {}", totals.with_tax),
            format!("  Total w/ Tax & Buffer:{}", totals.with_tax_and_buffer),
        ]
    }

    /// Summary as one newline-joined string
    pub fn summary_text(&self) -> String {
        self.summary_lines().join("\n")
    }

    /// Cross-sections in section order
    pub fn cross_sections(&self) -> Vec<CrossSection> {
        self.cathedral
            .sections
            .iter()
            .map(|s| CrossSection {
                base_width_ft: s.section.base_width_ft,
                rise_ft: s.section.rise_ft,
            })
            .collect()
    }
}
