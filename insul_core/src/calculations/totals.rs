//! # Totals
//!
//! Material and labour subtotals, then fixed tax and contingency multipliers.

use serde::{Deserialize, Serialize};

use crate::units::Dollars;

use super::labour::LabourCosts;

/// 5% sales tax
pub const TAX_MULTIPLIER: f64 = 1.05;

/// 10% contingency on the tax-inclusive total
pub const CONTINGENCY_MULTIPLIER: f64 = 1.10;

/// The four headline totals of an estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Wall + cathedral + ceiling material
    pub material: Dollars,
    /// Wall + area + ceiling labour + cathedral surcharge
    pub labour: Dollars,
    /// (material + labour) x 1.05
    pub with_tax: Dollars,
    /// with_tax x 1.10
    pub with_tax_and_buffer: Dollars,
}

/// Aggregate material costs and labour lines into the four totals
pub fn aggregate(wall_material: Dollars, cathedral_material: Dollars, ceiling_material: Dollars, labour: &LabourCosts) -> Totals {
    let material = wall_material.0 + cathedral_material.0 + ceiling_material.0;
    let labour = labour.wall.0 + labour.area.0 + labour.ceiling.0 + labour.cathedral_surcharge.0;
    let with_tax = (material + labour) * TAX_MULTIPLIER;
    let with_tax_and_buffer = with_tax * CONTINGENCY_MULTIPLIER;

    tracing::debug!(material, labour, with_tax, with_tax_and_buffer, "totals aggregated");

    Totals {
        material: Dollars(material),
        labour: Dollars(labour),
        with_tax: Dollars(with_tax),
        with_tax_and_buffer: Dollars(with_tax_and_buffer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labour(wall: f64, area: f64, ceiling: f64, surcharge: f64) -> LabourCosts {
        LabourCosts {
            wall: Dollars(wall),
            area: Dollars(area),
            ceiling: Dollars(ceiling),
            cathedral_surcharge: Dollars(surcharge),
        }
    }

    #[test]
    fn test_subtotals() {
        let totals = aggregate(Dollars(200.0), Dollars(150.0), Dollars(50.0), &labour(10.0, 20.0, 30.0, 40.0));
        assert_eq!(totals.material, Dollars(400.0));
        assert_eq!(totals.labour, Dollars(100.0));
        assert!((totals.with_tax.0 - 525.0).abs() < 1e-9);
        assert!((totals.with_tax_and_buffer.0 - 577.5).abs() < 1e-9);
    }

    #[test]
    fn test_buffered_total_is_exact_product() {
        let cases = [
            (0.0, 0.0, 0.0, labour(0.0, 0.0, 0.0, 0.0)),
            (200.0, 0.0, 0.0, labour(144.0, 144.0, 0.0, 0.0)),
            (123.45, 678.9, 0.1, labour(0.3, 0.7, 315.0, 520.0)),
        ];
        for (wall, cat, ceil, lab) in cases {
            let totals = aggregate(Dollars(wall), Dollars(cat), Dollars(ceil), &lab);
            let expected = (totals.material.0 + totals.labour.0) * 1.05 * 1.10;
            assert_eq!(totals.with_tax_and_buffer.0, expected);
        }
    }
}
