//! # Estimate Calculations
//!
//! Each calculator is a pure function over plain inputs. Data flows one way:
//!
//! ```text
//! catalog + inputs → area → consumption / batts / labour → totals → report
//! ```
//!
//! ## Available Calculators
//!
//! - [`area`] - Wall, cathedral section and blown-in ceiling areas
//! - [`consumption`] - Bag, piece and material cost from area and coverage
//! - [`batts`] - Stud/truss bay counts
//! - [`labour`] - Labour lines and per-section surcharges
//! - [`totals`] - Subtotals with fixed tax and contingency
//! - [`estimate`] - Validates inputs and runs all of the above

pub mod area;
pub mod batts;
pub mod consumption;
pub mod estimate;
pub mod labour;
pub mod totals;

// Re-export commonly used types
pub use area::CathedralSection;
pub use consumption::{MaterialUsage, CATHEDRAL_COVERAGE_BUFFER, NO_BUFFER};
pub use estimate::{calculate, CathedralInput, CeilingInput, EstimateInput, WallInput};
pub use labour::{LabourCosts, LabourRates};
pub use totals::{Totals, CONTINGENCY_MULTIPLIER, TAX_MULTIPLIER};
