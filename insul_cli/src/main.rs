//! # Insulation Estimator CLI
//!
//! Runs estimates from JSON job files and prints the summary, the full
//! report as JSON, or a PDF.
//!
//! ```bash
//! insul init job.json
//! insul estimate job.json --pdf estimate_output.pdf
//! insul --format json estimate job.json
//! insul catalog --r-value R28
//! ```
//!
//! Exit status is 0 on success, 2 when the job's inputs are rejected
//! (unknown material, bad coverage, negative or out-of-range values) and 1
//! for everything else (missing files, version mismatch, render failures).

mod cli;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use insul_core::EstimateError;

use cli::Cli;
use output::Output;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);
    let output = Output::new(cli.format);

    match cli::run(cli.command, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output.error(&e);
            exit_code(&e)
        }
    }
}

/// Exit status for a failed command
fn exit_code(error: &anyhow::Error) -> ExitCode {
    let input_error = error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<EstimateError>())
        .any(EstimateError::is_input_error);
    if input_error {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}
