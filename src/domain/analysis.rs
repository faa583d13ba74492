//! Aggregate analysis result

use super::{ClassifiedDependency, UpdateType};
use serde::{Deserialize, Serialize};

/// Outcome of analyzing one manifest
///
/// Either `success` is true and `dependencies` holds one entry per manifest
/// entry, or `success` is false, `dependencies` is empty and `error` says why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub success: bool,
    pub dependencies: Vec<ClassifiedDependency>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total_packages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub packages_with_updates: Option<usize>,
}

impl AnalysisResult {
    /// Creates a successful result, computing the summary counts
    pub fn completed(dependencies: Vec<ClassifiedDependency>) -> Self {
        let packages_with_updates = dependencies.iter().filter(|d| d.has_update()).count();
        Self {
            success: true,
            total_packages: Some(dependencies.len()),
            packages_with_updates: Some(packages_with_updates),
            dependencies,
            error: None,
        }
    }

    /// Creates a failed result carrying a user-visible message
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            dependencies: Vec::new(),
            error: Some(error.into()),
            total_packages: None,
            packages_with_updates: None,
        }
    }

    /// Returns the number of analyzed dependencies
    pub fn total(&self) -> usize {
        self.total_packages.unwrap_or(self.dependencies.len())
    }

    /// Returns the number of dependencies with an available update
    pub fn with_updates(&self) -> usize {
        self.packages_with_updates
            .unwrap_or_else(|| self.updates().count())
    }

    /// Returns the number of dependencies of the given update type
    pub fn count_by_type(&self, update_type: UpdateType) -> usize {
        self.dependencies
            .iter()
            .filter(|d| d.update_type == update_type)
            .count()
    }

    /// Returns all dependencies with an available update
    pub fn updates(&self) -> impl Iterator<Item = &ClassifiedDependency> {
        self.dependencies.iter().filter(|d| d.has_update())
    }

    /// Returns all dependencies whose lookup failed
    pub fn unresolved(&self) -> impl Iterator<Item = &ClassifiedDependency> {
        self.dependencies.iter().filter(|d| d.lookup_error.is_some())
    }
}
