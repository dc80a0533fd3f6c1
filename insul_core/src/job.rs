//! # Job Files
//!
//! An `EstimateJob` is what the input surface hands the engine: who is
//! quoting, for which job, and the raw inputs. Job files are plain JSON so
//! they can be written by any form, script or spreadsheet export.
//!
//! ## Structure
//!
//! ```text
//! EstimateJob
//! ├── meta: JobMetadata (schema version, estimator, job id, client, created)
//! └── input: EstimateInput (wall, cathedral, ceiling, labour)
//! ```
//!
//! Reports are never stored in the job; run the job again to get one.
//!
//! ## Example
//!
//! ```rust
//! use insul_core::calculations::EstimateInput;
//! use insul_core::job::EstimateJob;
//! use insul_core::materials::MaterialCatalog;
//!
//! let job = EstimateJob::new("Sam Estimator", "26-014", "Harbour Homes", EstimateInput::sample());
//! let report = job.run(&MaterialCatalog::standard()).unwrap();
//! assert!(report.totals.with_tax_and_buffer.0 > 0.0);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::estimate::{self, EstimateInput};
use crate::errors::EstimateResult;
use crate::materials::MaterialCatalog;
use crate::report::EstimateReport;

/// Current schema version for job files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root job document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateJob {
    /// Job metadata (version, estimator, job info)
    pub meta: JobMetadata,

    /// Dimensions, products and pricing
    pub input: EstimateInput,
}

impl EstimateJob {
    /// Create a job stamped with the current schema version and time.
    ///
    /// # Arguments
    ///
    /// * `estimator` - Name of the person preparing the estimate
    /// * `job_id` - Job/quote number (e.g., "26-014")
    /// * `client` - Client name
    /// * `input` - Estimate inputs
    pub fn new(
        estimator: impl Into<String>,
        job_id: impl Into<String>,
        client: impl Into<String>,
        input: EstimateInput,
    ) -> Self {
        EstimateJob {
            meta: JobMetadata {
                version: SCHEMA_VERSION.to_string(),
                estimator: estimator.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: Utc::now(),
            },
            input,
        }
    }

    /// Run the estimate for this job against `catalog`
    pub fn run(&self, catalog: &MaterialCatalog) -> EstimateResult<EstimateReport> {
        tracing::info!(job_id = %self.meta.job_id, "running estimate");
        estimate::calculate(&self.input, catalog)
    }
}

/// Job metadata stored in the file header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the estimator
    #[serde(default)]
    pub estimator: String,

    /// Job/quote number
    #[serde(default)]
    pub job_id: String,

    /// Client name
    #[serde(default)]
    pub client: String,

    /// When the job file was created
    pub created: DateTime<Utc>,
}
