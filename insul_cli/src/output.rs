//! Output formatting for CLI commands

use insul_core::EstimateError;
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints an error, with the structured body when the cause is an `EstimateError`
    pub fn error(&self, error: &anyhow::Error) {
        let estimate_error = error.chain().find_map(|cause| cause.downcast_ref::<EstimateError>());
        match self.format {
            OutputFormat::Text => eprintln!("Error: {:#}", error),
            OutputFormat::Json => {
                let body = serde_json::json!({
                    "success": false,
                    "error": format!("{:#}", error),
                    "code": estimate_error.map(EstimateError::error_code),
                    "details": estimate_error,
                });
                eprintln!("{}", body);
            }
        }
    }

    /// Prints structured data as JSON
    pub fn data<T: Serialize>(&self, data: &T) {
        let json = match self.format {
            OutputFormat::Text => serde_json::to_string_pretty(data),
            OutputFormat::Json => serde_json::to_string(data),
        };
        if let Ok(json) = json {
            println!("{}", json);
        }
    }

    /// Prints a line (text only, ignored in JSON mode)
    pub fn line(&self, text: &str) {
        if self.is_text() {
            println!("{}", text);
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Returns true if using text format
    pub fn is_text(&self) -> bool {
        self.format == OutputFormat::Text
    }
}
