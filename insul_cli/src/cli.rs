//! Command definitions and handlers

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use insul_core::calculations::EstimateInput;
use insul_core::materials::{MaterialCatalog, RValue};
use insul_core::pdf::export_pdf;
use insul_core::report::DEFAULT_ARTIFACT_NAME;
use insul_core::{load_job, save_job, EstimateJob};

use crate::output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "insul")]
#[command(author, version, about = "Material, labour and cost estimates for insulation jobs")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an estimate from a job file
    Estimate {
        /// Path to the job file (JSON)
        job: PathBuf,

        /// Alternate material catalog (TOML)
        #[arg(long, env = "INSUL_CATALOG")]
        catalog: Option<PathBuf>,

        /// Also write a PDF report (estimate_output.pdf when no path is given)
        #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_ARTIFACT_NAME)]
        pdf: Option<PathBuf>,
    },

    /// List catalog products
    Catalog {
        /// Alternate material catalog (TOML)
        #[arg(long, env = "INSUL_CATALOG")]
        catalog: Option<PathBuf>,

        /// Only show one R-value tier (e.g., R28)
        #[arg(long)]
        r_value: Option<String>,
    },

    /// Write a starter job file
    Init {
        /// Where to write the job file
        path: PathBuf,

        /// Estimator name
        #[arg(long, default_value = "")]
        estimator: String,

        /// Job/quote number
        #[arg(long, default_value = "")]
        job_id: String,

        /// Client name
        #[arg(long, default_value = "")]
        client: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Execute a parsed command
pub fn run(command: Commands, output: &Output) -> Result<()> {
    match command {
        Commands::Estimate { job, catalog, pdf } => estimate(output, &job, catalog.as_deref(), pdf.as_deref()),
        Commands::Catalog { catalog, r_value } => list_catalog(output, catalog.as_deref(), r_value.as_deref()),
        Commands::Init {
            path,
            estimator,
            job_id,
            client,
            force,
        } => init(output, &path, estimator, job_id, client, force),
    }
}

fn open_catalog(path: Option<&Path>) -> Result<MaterialCatalog> {
    match path {
        Some(path) => MaterialCatalog::from_toml_file(path)
            .with_context(|| format!("loading catalog {}", path.display())),
        None => Ok(MaterialCatalog::shared().clone()),
    }
}

fn estimate(output: &Output, job_path: &Path, catalog: Option<&Path>, pdf: Option<&Path>) -> Result<()> {
    let catalog = open_catalog(catalog)?;
    let job = load_job(job_path).with_context(|| format!("loading job {}", job_path.display()))?;
    tracing::debug!(path = %job_path.display(), catalog_entries = catalog.len(), "job loaded");
    let report = job.run(&catalog)?;

    if let Some(pdf_path) = pdf {
        export_pdf(&report, &job.meta, pdf_path)
            .with_context(|| format!("writing PDF {}", pdf_path.display()))?;
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "job": job.meta,
            "report": report,
            "summary": report.summary_lines(),
        }));
        return Ok(());
    }

    let heading = match (job.meta.job_id.is_empty(), job.meta.client.is_empty()) {
        (false, false) => format!("  INSULATION ESTIMATE - {} ({})", job.meta.job_id, job.meta.client),
        (false, true) => format!("  INSULATION ESTIMATE - {}", job.meta.job_id),
        _ => "  INSULATION ESTIMATE".to_string(),
    };
    output.line("═══════════════════════════════════════");
    output.line(&heading);
    output.line("═══════════════════════════════════════");
    output.line("");
    output.line(&report.summary_text());
    if let Some(pdf_path) = pdf {
        output.line("");
        output.line(&format!("PDF written to {}", pdf_path.display()));
    }
    Ok(())
}

fn list_catalog(output: &Output, catalog: Option<&Path>, r_value: Option<&str>) -> Result<()> {
    let catalog = open_catalog(catalog)?;
    let filter = r_value.map(RValue::from_str_flexible).transpose()?;

    let specs: Vec<_> = catalog
        .entries()
        .filter(|spec| filter.map_or(true, |r| spec.r_value == r))
        .copied()
        .collect();

    if let Some(r) = filter {
        if specs.is_empty() {
            bail!("catalog has no products for {}", r);
        }
    }

    if output.is_json() {
        output.data(&specs);
        return Ok(());
    }

    for spec in specs {
        output.line(&spec.display_name());
    }
    Ok(())
}

fn init(output: &Output, path: &Path, estimator: String, job_id: String, client: String, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let job = EstimateJob::new(estimator, job_id, client, EstimateInput::sample());
    save_job(&job, path).with_context(|| format!("writing job {}", path.display()))?;
    output.success(&format!("Created job file {}", path.display()));
    Ok(())
}
