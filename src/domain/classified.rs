//! Per-dependency classification results

use super::{DependencyCandidate, UpdateType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder reported when the latest version could not be determined
pub const UNKNOWN_VERSION: &str = "Unknown";

/// Lookup error reported when the registry has no such package
pub const NOT_FOUND_MESSAGE: &str = "Package not found in npm registry";

/// Prefix of the lookup error reported when the registry could not be queried
pub const LOOKUP_FAILED_PREFIX: &str = "Failed to fetch package from npm registry";

/// Classification of a single manifest entry
///
/// `update_type` is always [`UpdateType::UpToDate`] when `resolved_latest`
/// is [`UNKNOWN_VERSION`]; the constructors below are the only way the
/// analyzer builds one, and they keep that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedDependency {
    /// Package name
    pub name: String,
    /// Version specifier as written in the manifest
    #[serde(alias = "currentVersion")]
    pub declared_range: String,
    /// Latest published version, or "Unknown"
    #[serde(alias = "latestVersion")]
    pub resolved_latest: String,
    /// Size of the available update
    pub update_type: UpdateType,
    /// Whether this entry came from devDependencies
    #[serde(alias = "isDevDependency")]
    pub is_dev: bool,
    /// Why the latest version could not be resolved
    #[serde(alias = "error", skip_serializing_if = "Option::is_none", default)]
    pub lookup_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub license: Option<String>,
    /// Publish timestamp of the latest version, as reported by the registry
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub published_date: Option<String>,
}

impl ClassifiedDependency {
    /// Creates a result for a candidate whose latest version is known
    pub fn resolved(
        candidate: &DependencyCandidate,
        latest: impl Into<String>,
        update_type: UpdateType,
    ) -> Self {
        let latest = latest.into();
        let update_type = if latest == UNKNOWN_VERSION {
            UpdateType::UpToDate
        } else {
            update_type
        };
        Self {
            name: candidate.name.clone(),
            declared_range: candidate.declared_range.clone(),
            resolved_latest: latest,
            update_type,
            is_dev: candidate.is_dev,
            lookup_error: None,
            description: None,
            homepage: None,
            license: None,
            published_date: None,
        }
    }

    /// Creates a result for a candidate whose lookup produced no version
    pub fn unresolved(candidate: &DependencyCandidate, error: impl Into<String>) -> Self {
        Self {
            lookup_error: Some(error.into()),
            ..Self::resolved(candidate, UNKNOWN_VERSION, UpdateType::UpToDate)
        }
    }

    /// Creates a result for a package the registry does not know
    pub fn not_found(candidate: &DependencyCandidate) -> Self {
        Self::unresolved(candidate, NOT_FOUND_MESSAGE)
    }

    /// Creates a result for a package whose lookup failed
    pub fn lookup_failed(candidate: &DependencyCandidate, message: &str) -> Self {
        Self::unresolved(candidate, format!("{}: {}", LOOKUP_FAILED_PREFIX, message))
    }

    /// Attaches registry metadata (builder pattern)
    pub fn with_details(
        mut self,
        description: Option<String>,
        homepage: Option<String>,
        license: Option<String>,
        published_date: Option<String>,
    ) -> Self {
        self.description = description;
        self.homepage = homepage;
        self.license = license;
        self.published_date = published_date;
        self
    }

    /// Returns true if a newer version is available
    pub fn has_update(&self) -> bool {
        self.update_type.has_update()
    }

    /// Returns true if the latest version could not be determined
    pub fn is_unknown(&self) -> bool {
        self.resolved_latest == UNKNOWN_VERSION
    }

    /// Returns the npm website link for this package
    pub fn npm_link(&self) -> String {
        format!("https://www.npmjs.com/package/{}", self.name)
    }
}

impl fmt::Display for ClassifiedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lookup_error {
            Some(error) => write!(f, "{}: {} ({})", self.name, self.declared_range, error),
            None => write!(
                f,
                "{}: {} → {} [{}]",
                self.name, self.declared_range, self.resolved_latest, self.update_type
            ),
        }
    }
}
