//! JSON output formatter for machine processing
//!
//! A successful analysis is written as an export document with summary
//! counts and an npm link per dependency. A failed analysis is written as
//! the bare `AnalysisResult` so callers still see `success` and `error`.

use crate::domain::{AnalysisResult, ClassifiedDependency};
use crate::output::OutputFormatter;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter {
    /// Fixed export timestamp; `None` uses the current time
    export_date: Option<DateTime<Utc>>,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed export timestamp
    pub fn at(export_date: DateTime<Utc>) -> Self {
        Self {
            export_date: Some(export_date),
        }
    }
}

/// Export document for a successful analysis
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    export_date: String,
    total_packages: usize,
    packages_with_updates: usize,
    dependencies: Vec<JsonDependency<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDependency<'a> {
    #[serde(flatten)]
    dependency: &'a ClassifiedDependency,
    npm_link: String,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &AnalysisResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let rendered = if result.success {
            let export_date = self.export_date.unwrap_or_else(Utc::now);
            let export = JsonExport {
                export_date: export_date.to_rfc3339_opts(SecondsFormat::Millis, true),
                total_packages: result.total(),
                packages_with_updates: result.with_updates(),
                dependencies: result
                    .dependencies
                    .iter()
                    .map(|dependency| JsonDependency {
                        dependency,
                        npm_link: dependency.npm_link(),
                    })
                    .collect(),
            };
            serde_json::to_string_pretty(&export)
        } else {
            serde_json::to_string_pretty(result)
        };
        let json = rendered.map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)
    }
}
