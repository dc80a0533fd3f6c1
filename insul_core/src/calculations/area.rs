//! # Surface Areas
//!
//! Square footage for the three surfaces an estimate covers. Inputs are
//! assumed non-negative; [`EstimateInput::validate`](super::EstimateInput::validate)
//! rejects negatives before anything here runs.
//!
//! ## Cathedral Geometry
//!
//! A cathedral section is a symmetric gable: each half of the base width and
//! the rise form the legs of a right triangle whose hypotenuse is the rafter
//! slope. Both roof planes get insulated.
//!
//! ```text
//!              /\
//!      slope  /  \  slope
//!            /    | rise
//!           /_____|_____\
//!             base / 2
//! ```

use serde::{Deserialize, Serialize};

use crate::units::{Feet, SquareFeet};

/// Gross wall area: linear feet x height
pub fn wall_area(linear_ft: f64, height_ft: f64) -> SquareFeet {
    Feet(linear_ft) * Feet(height_ft)
}

/// One cathedral (vaulted) ceiling section.
///
/// ## JSON Example
///
/// ```json
/// { "length_ft": 20.0, "base_width_ft": 24.0, "rise_ft": 8.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CathedralSection {
    /// Length along the ridge (ft)
    pub length_ft: f64,
    /// Wall-to-wall span under the section (ft)
    pub base_width_ft: f64,
    /// Height of the ridge above the wall top plate (ft)
    pub rise_ft: f64,
}

impl CathedralSection {
    pub fn new(length_ft: f64, base_width_ft: f64, rise_ft: f64) -> Self {
        CathedralSection {
            length_ft,
            base_width_ft,
            rise_ft,
        }
    }

    /// Rafter slope length: sqrt((base / 2)^2 + rise^2)
    pub fn slope_ft(&self) -> f64 {
        (self.base_width_ft / 2.0).hypot(self.rise_ft)
    }

    /// Insulated area of both roof planes: 2 x slope x length
    pub fn area(&self) -> SquareFeet {
        SquareFeet(2.0 * self.slope_ft() * self.length_ft)
    }
}

/// Sum of all section areas (zero for no sections)
pub fn total_cathedral_area(sections: &[CathedralSection]) -> SquareFeet {
    sections.iter().map(CathedralSection::area).sum()
}

/// Blown-in ceiling area net of vaulted exclusions, floored at zero.
///
/// An exclusion larger than the gross area is an entry anomaly; it yields
/// zero rather than a negative area.
pub fn ceiling_net_area(gross_sqft: f64, vaulted_exclusion_sqft: f64) -> SquareFeet {
    SquareFeet((gross_sqft - vaulted_exclusion_sqft).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_area() {
        assert_eq!(wall_area(40.0, 8.0).0, 320.0);
        assert_eq!(wall_area(0.0, 8.0).0, 0.0);
    }

    #[test]
    fn test_cathedral_section_geometry() {
        // slope = sqrt(12^2 + 8^2) = sqrt(208) = 14.422
        let section = CathedralSection::new(20.0, 24.0, 8.0);
        assert!((section.slope_ft() - 208.0_f64.sqrt()).abs() < 1e-12);
        // area = 2 * 14.422 * 20 = 576.89
        assert!((section.area().0 - 576.888).abs() < 0.01);
    }

    #[test]
    fn test_flat_section_degenerates_to_plan_area() {
        for (length, base) in [(20.0, 24.0), (13.5, 7.25), (1.0, 0.0)] {
            let section = CathedralSection::new(length, base, 0.0);
            assert!((section.slope_ft() - base / 2.0).abs() < 1e-12);
            assert!((section.area().0 - base * length).abs() < 1e-9);
        }
    }

    #[test]
    fn test_total_cathedral_area() {
        let sections = [
            CathedralSection::new(20.0, 24.0, 8.0),
            CathedralSection::new(10.0, 12.0, 0.0),
        ];
        let expected = sections[0].area().0 + 120.0;
        assert!((total_cathedral_area(&sections).0 - expected).abs() < 1e-9);
        assert_eq!(total_cathedral_area(&[]).0, 0.0);
    }

    #[test]
    fn test_ceiling_net_area_floor() {
        assert_eq!(ceiling_net_area(1000.0, 250.0).0, 750.0);
        assert_eq!(ceiling_net_area(1000.0, 1000.0).0, 0.0);
        assert_eq!(ceiling_net_area(300.0, 1000.0).0, 0.0);
    }
}
