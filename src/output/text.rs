//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Colored per-dependency lines with the update type label
//! - Production vs development dependency grouping
//! - Lookup failures shown inline
//! - Summary with a per-type breakdown

use crate::domain::{AnalysisResult, ClassifiedDependency, UpdateType};
use crate::output::{OutputFormatter, Verbosity};
use chrono::DateTime;
use colored::Colorize;
use std::io::Write;

/// Minimum width of the name column
const MIN_NAME_WIDTH: usize = 20;

/// Text formatter for human-readable output
pub struct TextFormatter {
    verbosity: Verbosity,
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self::with_color(verbosity, true)
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn colored_label(update_type: UpdateType) -> String {
        match update_type {
            UpdateType::Major => "major".red().bold().to_string(),
            UpdateType::Minor => "minor".yellow().to_string(),
            UpdateType::Patch => "patch".green().to_string(),
            UpdateType::UpToDate => "up-to-date".dimmed().to_string(),
        }
    }

    /// Whether a dependency gets its own line at this verbosity
    fn is_listed(&self, dependency: &ClassifiedDependency) -> bool {
        match self.verbosity {
            Verbosity::Quiet => false,
            Verbosity::Normal => dependency.has_update() || dependency.lookup_error.is_some(),
            Verbosity::Verbose => true,
        }
    }

    /// Publish date as "YYYY/MM/DD HH:MM", if the registry reported one
    fn published_display(dependency: &ClassifiedDependency) -> Option<String> {
        let published = dependency.published_date.as_deref()?;
        DateTime::parse_from_rfc3339(published)
            .ok()
            .map(|d| format!(" ({})", d.format("%Y/%m/%d %H:%M")))
    }

    fn format_line(
        &self,
        dependency: &ClassifiedDependency,
        width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if let Some(ref error) = dependency.lookup_error {
            return if self.color {
                writeln!(
                    writer,
                    "  {} {} {}",
                    format!("{:width$}", dependency.name, width = width).dimmed(),
                    dependency.declared_range.dimmed(),
                    format!("({})", error).red()
                )
            } else {
                writeln!(
                    writer,
                    "  {:width$} {} ({})",
                    dependency.name,
                    dependency.declared_range,
                    error,
                    width = width
                )
            };
        }

        let date = if self.verbosity == Verbosity::Verbose {
            Self::published_display(dependency).unwrap_or_default()
        } else {
            String::new()
        };

        if self.color {
            writeln!(
                writer,
                "  {:width$} {} {} {} [{}]{}",
                dependency.name,
                dependency.declared_range.dimmed(),
                "→".dimmed(),
                dependency.resolved_latest.bright_white().bold(),
                Self::colored_label(dependency.update_type),
                date.dimmed(),
                width = width
            )
        } else {
            writeln!(
                writer,
                "  {:width$} {} -> {} [{}]{}",
                dependency.name,
                dependency.declared_range,
                dependency.resolved_latest,
                dependency.update_type,
                date,
                width = width
            )
        }
    }

    fn format_group(
        &self,
        title: &str,
        dependencies: &[&ClassifiedDependency],
        width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if dependencies.is_empty() {
            return Ok(());
        }
        if self.color {
            writeln!(writer, "{}", title.bold())?;
        } else {
            writeln!(writer, "{}", title)?;
        }
        for dependency in dependencies {
            self.format_line(dependency, width, writer)?;
        }
        writeln!(writer)
    }

    fn format_summary(&self, result: &AnalysisResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let total = result.total();
        let updates = result.with_updates();

        if self.verbosity == Verbosity::Quiet {
            return writeln!(writer, "{} of {} packages have updates", updates, total);
        }

        let breakdown: Vec<String> = UpdateType::all()
            .iter()
            .rev()
            .map(|&update_type| {
                let count = result.count_by_type(update_type);
                if self.color {
                    format!("{} {}", count, Self::colored_label(update_type))
                } else {
                    format!("{} {}", count, update_type)
                }
            })
            .collect();

        if self.color {
            writeln!(writer, "{}:", "Summary".bold())?;
            writeln!(
                writer,
                "  {} packages analyzed, {} with updates",
                total,
                updates.to_string().green()
            )?;
        } else {
            writeln!(writer, "Summary:")?;
            writeln!(writer, "  {} packages analyzed, {} with updates", total, updates)?;
        }
        writeln!(writer, "  {}", breakdown.join(", "))?;

        let unresolved = result.unresolved().count();
        if unresolved > 0 {
            writeln!(writer, "  {} could not be resolved", unresolved)?;
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &AnalysisResult, writer: &mut dyn Write) -> std::io::Result<()> {
        if !result.success {
            let message = result.error.as_deref().unwrap_or("analysis failed");
            return if self.color {
                writeln!(writer, "{} {}", "Error:".red().bold(), message)
            } else {
                writeln!(writer, "Error: {}", message)
            };
        }

        let (dev, prod): (Vec<&ClassifiedDependency>, Vec<&ClassifiedDependency>) = result
            .dependencies
            .iter()
            .filter(|d| self.is_listed(d))
            .partition(|d| d.is_dev);

        let width = prod
            .iter()
            .chain(dev.iter())
            .map(|d| d.name.len())
            .max()
            .unwrap_or(0)
            .max(MIN_NAME_WIDTH);

        self.format_group("dependencies", &prod, width, writer)?;
        self.format_group("devDependencies", &dev, width, writer)?;

        if self.verbosity == Verbosity::Normal && result.with_updates() == 0 {
            if self.color {
                writeln!(writer, "{}", "All dependencies are up to date".green())?;
            } else {
                writeln!(writer, "All dependencies are up to date")?;
            }
        }

        self.format_summary(result, writer)
    }
}
