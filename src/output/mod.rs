//! Output formatting for analysis results
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON export document for machine processing
//! - CSV export for spreadsheets

mod csv;
mod json;
mod text;

pub use csv::CsvFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::AnalysisResult;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON export document
    Json,
    /// Comma-separated values, one row per dependency
    Csv,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Summary only
    Quiet,
    /// Updates and lookup failures
    #[default]
    Normal,
    /// Every dependency, including up-to-date ones
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json, csv)
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Whether to use colors (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(format: OutputFormat, verbosity: Verbosity) -> Self {
        Self {
            format,
            verbosity,
            color: true,
        }
    }

    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, csv: bool, verbose: bool, quiet: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else if csv {
            OutputFormat::Csv
        } else {
            OutputFormat::Text
        };

        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self::new(format, verbosity)
    }

    /// Disable colored output (builder pattern)
    pub fn without_color(mut self) -> Self {
        self.color = false;
        self
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write an analysis result
    fn format(&self, result: &AnalysisResult, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.verbosity, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
