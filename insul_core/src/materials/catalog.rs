//! Batt product catalog.
//!
//! The standard table is compiled in. Alternate tables (regional products,
//! test fixtures) load from TOML and are passed to the estimate the same way,
//! so nothing in the calculators reaches for a global.

use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::RValue;
use crate::errors::{EstimateError, EstimateResult};

/// Coverage and yield for one (R-value, width) product
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// R-value tier
    pub r_value: RValue,
    /// Batt width in inches
    pub width_in: u32,
    /// Square feet covered by one bag
    pub coverage_per_bag_sqft: f64,
    /// Batts per bag
    pub pieces_per_bag: u32,
}

impl MaterialSpec {
    /// Get display name (e.g., "R14 23\" - 120.1 sq ft/bag, 16 pcs/bag")
    pub fn display_name(&self) -> String {
        format!(
            "{} {}\" - {} sq ft/bag, {} pcs/bag",
            self.r_value, self.width_in, self.coverage_per_bag_sqft, self.pieces_per_bag
        )
    }
}

/// (R-value, width, coverage sq ft/bag, pieces/bag)
const STANDARD_TABLE: [(RValue, u32, f64, u32); 14] = [
    (RValue::R12, 15, 100.0, 20),
    (RValue::R12, 23, 153.3, 20),
    (RValue::R14, 15, 78.3, 16),
    (RValue::R14, 23, 120.1, 16),
    (RValue::R20, 15, 80.0, 16),
    (RValue::R20, 23, 122.7, 16),
    (RValue::R22, 15, 49.0, 10),
    (RValue::R22, 23, 75.1, 10),
    (RValue::R28, 16, 53.3, 10),
    (RValue::R28, 24, 80.0, 10),
    (RValue::R31, 16, 42.7, 8),
    (RValue::R31, 24, 64.0, 8),
    (RValue::R40, 16, 32.0, 6),
    (RValue::R40, 24, 48.0, 6),
];

static STANDARD: Lazy<MaterialCatalog> = Lazy::new(MaterialCatalog::standard);

/// Immutable lookup table of batt products.
///
/// Ordered by R-value then width, which is also the order `entries()` and
/// the CLI listing use.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialCatalog {
    entries: BTreeMap<(RValue, u32), MaterialSpec>,
}

/// TOML layout: a list of `[[material]]` tables
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    material: Vec<CatalogRow>,
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    r_value: String,
    width_in: u32,
    coverage_per_bag_sqft: f64,
    pieces_per_bag: u32,
}

impl MaterialCatalog {
    /// Build the standard catalog
    pub fn standard() -> Self {
        let entries = STANDARD_TABLE
            .iter()
            .map(|&(r_value, width_in, coverage_per_bag_sqft, pieces_per_bag)| {
                (
                    (r_value, width_in),
                    MaterialSpec {
                        r_value,
                        width_in,
                        coverage_per_bag_sqft,
                        pieces_per_bag,
                    },
                )
            })
            .collect();
        MaterialCatalog { entries }
    }

    /// Shared read-only standard catalog, built on first use
    pub fn shared() -> &'static MaterialCatalog {
        &STANDARD
    }

    /// Build a catalog from explicit specs.
    ///
    /// Rejects non-positive coverage, zero pieces and duplicate keys.
    pub fn from_specs(specs: impl IntoIterator<Item = MaterialSpec>) -> EstimateResult<Self> {
        let mut entries = BTreeMap::new();
        for spec in specs {
            if !(spec.coverage_per_bag_sqft.is_finite() && spec.coverage_per_bag_sqft > 0.0) {
                return Err(EstimateError::invalid_coverage(
                    format!("catalog {} {}\"", spec.r_value, spec.width_in),
                    spec.coverage_per_bag_sqft,
                ));
            }
            if spec.pieces_per_bag == 0 {
                return Err(EstimateError::invalid_input(
                    format!("catalog {} {}\" pieces_per_bag", spec.r_value, spec.width_in),
                    "0",
                    "Pieces per bag must be positive",
                ));
            }
            if entries.insert((spec.r_value, spec.width_in), spec).is_some() {
                return Err(EstimateError::invalid_input(
                    "catalog",
                    format!("{} {}\"", spec.r_value, spec.width_in),
                    "Duplicate catalog entry",
                ));
            }
        }
        Ok(MaterialCatalog { entries })
    }

    /// Parse a catalog from TOML text.
    ///
    /// ```rust
    /// use insul_core::materials::{MaterialCatalog, RValue};
    ///
    /// let catalog = MaterialCatalog::from_toml_str(r#"
    /// [[material]]
    /// r_value = "R20"
    /// width_in = 15
    /// coverage_per_bag_sqft = 90.0
    /// pieces_per_bag = 18
    /// "#).unwrap();
    ///
    /// assert_eq!(catalog.lookup(RValue::R20, 15).unwrap().pieces_per_bag, 18);
    /// ```
    pub fn from_toml_str(text: &str) -> EstimateResult<Self> {
        let file: CatalogFile = toml::from_str(text)
            .map_err(|e| EstimateError::serialization(format!("Invalid catalog TOML: {}", e)))?;

        let specs = file
            .material
            .into_iter()
            .map(|row| {
                let r_value = RValue::from_str_flexible(&row.r_value)?;
                Ok(MaterialSpec {
                    r_value,
                    width_in: row.width_in,
                    coverage_per_bag_sqft: row.coverage_per_bag_sqft,
                    pieces_per_bag: row.pieces_per_bag,
                })
            })
            .collect::<EstimateResult<Vec<_>>>()?;

        Self::from_specs(specs)
    }

    /// Load a catalog from a TOML file
    pub fn from_toml_file(path: &Path) -> EstimateResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            EstimateError::file_error("read catalog", path.display().to_string(), e.to_string())
        })?;
        let catalog = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), entries = catalog.len(), "loaded material catalog");
        Ok(catalog)
    }

    /// Look up a product, failing for pairs the catalog does not carry
    pub fn lookup(&self, r_value: RValue, width_in: u32) -> EstimateResult<MaterialSpec> {
        self.entries
            .get(&(r_value, width_in))
            .copied()
            .ok_or_else(|| EstimateError::unknown_material(r_value.label(), width_in))
    }

    /// R-value tiers present, ascending
    pub fn r_values(&self) -> Vec<RValue> {
        let mut tiers: Vec<RValue> = self.entries.keys().map(|(r, _)| *r).collect();
        tiers.dedup();
        tiers
    }

    /// Widths available for a tier, ascending (empty if the tier is absent)
    pub fn widths_for(&self, r_value: RValue) -> Vec<u32> {
        self.entries
            .keys()
            .filter(|(r, _)| *r == r_value)
            .map(|(_, w)| *w)
            .collect()
    }

    /// All products in catalog order
    pub fn entries(&self) -> impl Iterator<Item = &MaterialSpec> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        MaterialCatalog::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_size() {
        let catalog = MaterialCatalog::standard();
        assert_eq!(catalog.len(), 14);
        assert_eq!(catalog.r_values(), RValue::ALL.to_vec());
    }

    #[test]
    fn test_width_sets_differ_by_tier() {
        let catalog = MaterialCatalog::standard();
        for r in [RValue::R12, RValue::R14, RValue::R20, RValue::R22] {
            assert_eq!(catalog.widths_for(r), vec![15, 23]);
        }
        for r in [RValue::R28, RValue::R31, RValue::R40] {
            assert_eq!(catalog.widths_for(r), vec![16, 24]);
        }
    }

    #[test]
    fn test_lookup_values() {
        let catalog = MaterialCatalog::standard();
        let r14 = catalog.lookup(RValue::R14, 23).unwrap();
        assert_eq!(r14.coverage_per_bag_sqft, 120.1);
        assert_eq!(r14.pieces_per_bag, 16);

        let r31 = catalog.lookup(RValue::R31, 16).unwrap();
        assert_eq!(r31.coverage_per_bag_sqft, 42.7);
        assert_eq!(r31.pieces_per_bag, 8);
    }

    #[test]
    fn test_unsupported_width_fails() {
        let catalog = MaterialCatalog::standard();
        let err = catalog.lookup(RValue::R12, 16).unwrap_err();
        assert_eq!(err, EstimateError::unknown_material("R12", 16));
        assert!(catalog.lookup(RValue::R40, 23).is_err());
    }

    #[test]
    fn test_shared_matches_standard() {
        assert_eq!(MaterialCatalog::shared(), &MaterialCatalog::standard());
    }

    #[test]
    fn test_toml_catalog() {
        let catalog = MaterialCatalog::from_toml_str(
            r#"
            [[material]]
            r_value = "R12"
            width_in = 15
            coverage_per_bag_sqft = 50.0
            pieces_per_bag = 10

            [[material]]
            r_value = "r-40"
            width_in = 24
            coverage_per_bag_sqft = 40.0
            pieces_per_bag = 5
            "#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup(RValue::R12, 15).unwrap().coverage_per_bag_sqft, 50.0);
        assert!(catalog.lookup(RValue::R12, 23).is_err());
        assert_eq!(catalog.widths_for(RValue::R40), vec![24]);
    }

    #[test]
    fn test_toml_rejects_zero_coverage() {
        let err = MaterialCatalog::from_toml_str(
            r#"
            [[material]]
            r_value = "R12"
            width_in = 15
            coverage_per_bag_sqft = 0.0
            pieces_per_bag = 10
            "#,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_COVERAGE");
    }

    #[test]
    fn test_toml_rejects_duplicates_and_garbage() {
        let dup = r#"
            [[material]]
            r_value = "R12"
            width_in = 15
            coverage_per_bag_sqft = 10.0
            pieces_per_bag = 1

            [[material]]
            r_value = "R12"
            width_in = 15
            coverage_per_bag_sqft = 20.0
            pieces_per_bag = 2
        "#;
        assert_eq!(MaterialCatalog::from_toml_str(dup).unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(
            MaterialCatalog::from_toml_str("material = 3").unwrap_err().error_code(),
            "SERIALIZATION_ERROR"
        );
    }
}
