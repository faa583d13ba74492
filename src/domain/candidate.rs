//! Dependency candidates flattened from a validated manifest

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single dependency entry awaiting resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyCandidate {
    /// Package name, used as the registry lookup key
    pub name: String,
    /// Version specifier exactly as written in the manifest (e.g. "^1.2.3")
    pub declared_range: String,
    /// Whether this entry came from devDependencies
    pub is_dev: bool,
}

impl DependencyCandidate {
    /// Creates a new candidate
    pub fn new(name: impl Into<String>, declared_range: impl Into<String>, is_dev: bool) -> Self {
        Self {
            name: name.into(),
            declared_range: declared_range.into(),
            is_dev,
        }
    }

    /// Creates a new production candidate
    pub fn production(name: impl Into<String>, declared_range: impl Into<String>) -> Self {
        Self::new(name, declared_range, false)
    }

    /// Creates a new development candidate
    pub fn development(name: impl Into<String>, declared_range: impl Into<String>) -> Self {
        Self::new(name, declared_range, true)
    }
}

impl fmt::Display for DependencyCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dev_marker = if self.is_dev { " (dev)" } else { "" };
        write!(f, "{}@{}{}", self.name, self.declared_range, dev_marker)
    }
}
