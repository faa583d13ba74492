//! CSV export
//!
//! One header row, then one row per dependency in result order. Data cells
//! are always double-quoted with embedded quotes doubled, so names and error
//! messages containing commas survive spreadsheet import.

use crate::domain::{AnalysisResult, ClassifiedDependency};
use crate::output::OutputFormatter;
use std::io::Write;

const HEADERS: [&str; 7] = [
    "Package Name",
    "NPM Link",
    "Type",
    "Current Version",
    "Latest Version",
    "Update Type",
    "Status",
];

/// CSV formatter
pub struct CsvFormatter;

impl CsvFormatter {
    fn quote(cell: &str) -> String {
        format!("\"{}\"", cell.replace('"', "\"\""))
    }

    fn row(dependency: &ClassifiedDependency) -> [String; 7] {
        let status = dependency
            .lookup_error
            .clone()
            .unwrap_or_else(|| dependency.update_type.status_message().to_string());
        [
            dependency.name.clone(),
            dependency.npm_link(),
            if dependency.is_dev { "Dev" } else { "Prod" }.to_string(),
            dependency.declared_range.clone(),
            dependency.resolved_latest.clone(),
            dependency.update_type.label().to_string(),
            status,
        ]
    }
}

impl OutputFormatter for CsvFormatter {
    fn format(&self, result: &AnalysisResult, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "{}", HEADERS.join(","))?;
        for dependency in &result.dependencies {
            let cells: Vec<String> = Self::row(dependency)
                .iter()
                .map(|cell| Self::quote(cell))
                .collect();
            writeln!(writer, "{}", cells.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyCandidate, UpdateType};

    fn render(result: &AnalysisResult) -> String {
        let mut buf = Vec::new();
        CsvFormatter.format(result, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_update_type_cell_per_type() {
        let candidate = DependencyCandidate::production("pkg", "1.0.0");
        let result = AnalysisResult::completed(
            UpdateType::all()
                .iter()
                .map(|&update_type| ClassifiedDependency::resolved(&candidate, "2.0.0", update_type))
                .collect(),
        );

        let output = render(&result);
        let cells: Vec<&str> = output
            .lines()
            .skip(1)
            .map(|line| line.split(',').nth(5).unwrap())
            .collect();
        assert_eq!(
            cells,
            vec![r#""Up-to-date""#, r#""Patch""#, r#""Minor""#, r#""Major""#]
        );
    }

    #[test]
    fn test_header_row() {
        let output = render(&AnalysisResult::completed(vec![]));
        assert_eq!(
            output,
            "Package Name,NPM Link,Type,Current Version,Latest Version,Update Type,Status\n"
        );
    }

    #[test]
    fn test_rows() {
        let result = AnalysisResult::completed(vec![
            ClassifiedDependency::resolved(
                &DependencyCandidate::production("react", "^18.2.0"),
                "19.0.0",
                UpdateType::Major,
            ),
            ClassifiedDependency::resolved(
                &DependencyCandidate::development("jest", "^29.7.0"),
                "29.7.0",
                UpdateType::UpToDate,
            ),
        ]);

        let output = render(&result);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            r#""react","https://www.npmjs.com/package/react","Prod","^18.2.0","19.0.0","Major","Major Update Available - Review Breaking Changes""#
        );
        assert_eq!(
            lines[2],
            r#""jest","https://www.npmjs.com/package/jest","Dev","^29.7.0","29.7.0","Up-to-date","Up to Date""#
        );
    }

    #[test]
    fn test_lookup_error_replaces_status() {
        let result = AnalysisResult::completed(vec![ClassifiedDependency::not_found(
            &DependencyCandidate::production("ghost", "1.0.0"),
        )]);

        let output = render(&result);
        assert!(output.contains(r#""Unknown","Up-to-date","Package not found in npm registry""#));
    }

    #[test]
    fn test_quotes_are_doubled() {
        let result = AnalysisResult::completed(vec![ClassifiedDependency::lookup_failed(
            &DependencyCandidate::production("odd", "1.0.0"),
            "unexpected \"token\", giving up",
        )]);

        let output = render(&result);
        assert!(output.contains(r#"unexpected ""token"", giving up""#));
    }
}
