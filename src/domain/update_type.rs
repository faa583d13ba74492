//! Update type classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the gap between a declared version and the latest published one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateType {
    /// No newer version is available (or it could not be determined)
    UpToDate,
    /// Only the patch component increased
    Patch,
    /// The minor component increased
    Minor,
    /// The major component increased
    Major,
}

impl UpdateType {
    /// Returns all update types, least to most severe
    pub fn all() -> &'static [UpdateType] {
        &[
            UpdateType::UpToDate,
            UpdateType::Patch,
            UpdateType::Minor,
            UpdateType::Major,
        ]
    }

    /// Returns the wire name ("up-to-date", "patch", ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateType::UpToDate => "up-to-date",
            UpdateType::Patch => "patch",
            UpdateType::Minor => "minor",
            UpdateType::Major => "major",
        }
    }

    /// Returns the capitalized label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            UpdateType::UpToDate => "Up-to-date",
            UpdateType::Patch => "Patch",
            UpdateType::Minor => "Minor",
            UpdateType::Major => "Major",
        }
    }

    /// Returns a human-readable recommendation for this update type
    pub fn status_message(&self) -> &'static str {
        match self {
            UpdateType::Major => "Major Update Available - Review Breaking Changes",
            UpdateType::Minor => "Minor Update Available - Safe to Update",
            UpdateType::Patch => "Patch Update Available - Update Recommended",
            UpdateType::UpToDate => "Up to Date",
        }
    }

    /// Returns true if a newer version is available
    pub fn has_update(&self) -> bool {
        !matches!(self, UpdateType::UpToDate)
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
