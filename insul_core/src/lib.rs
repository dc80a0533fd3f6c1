//! # insul_core - Insulation Estimation Engine
//!
//! `insul_core` turns job dimensions, product selections and pricing into
//! bag counts, batt counts, labour lines and totals for residential
//! insulation work (walls, cathedral ceilings, blown-in ceilings).
//!
//! ## Design Philosophy
//!
//! - **Stateless**: One pure pass from inputs to an immutable report
//! - **Conservative**: Bags always round up, sloped surfaces carry a waste
//!   buffer, totals carry tax and contingency
//! - **Injected catalog**: Calculations take the material catalog as an
//!   argument, so alternate product tables drop in without code changes
//! - **JSON-First**: Inputs, reports and errors all serialize
//!
//! ## Quick Start
//!
//! ```rust
//! use insul_core::calculations::{calculate, EstimateInput};
//! use insul_core::materials::MaterialCatalog;
//!
//! let report = calculate(&EstimateInput::sample(), &MaterialCatalog::standard()).unwrap();
//! println!("{}", report.summary_text());
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Area, consumption, batt, labour and totals calculators
//! - [`materials`] - Batt product catalog
//! - [`report`] - Report model, cost breakdown and summary text
//! - [`job`] - Job documents (metadata + inputs)
//! - [`file_io`] - Job file loading and atomic artifact writes
//! - [`pdf`] - PDF export via Typst
//! - [`units`] - Unit newtypes
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod job;
pub mod materials;
pub mod pdf;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, EstimateInput};
pub use errors::{EstimateError, EstimateResult};
pub use file_io::{load_job, save_job, write_artifact};
pub use job::{EstimateJob, JobMetadata};
pub use materials::{MaterialCatalog, MaterialChoice, MaterialSpec, RValue};
pub use report::{CostBreakdown, EstimateReport};
