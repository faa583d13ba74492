//! Update classification for dependencies
//!
//! This module provides:
//! - Loose version cleaning and `major.minor.patch` extraction
//! - The classifier that sizes the gap between a declared range and the
//!   latest published version

mod version_core;

pub use version_core::{clean_version, VersionCore};

use crate::domain::UpdateType;

/// Classify the update from `declared` (a manifest range) to `latest`
///
/// Never fails. Identical cleaned strings are up to date even when they are
/// not numeric, and a latest version older than the declared one is reported
/// as up to date rather than as a downgrade.
pub fn classify(declared: &str, latest: &str) -> UpdateType {
    let clean_current = clean_version(declared);
    let clean_latest = clean_version(latest);

    if clean_current == clean_latest {
        return UpdateType::UpToDate;
    }

    let current = VersionCore::parse(clean_current);
    let latest = VersionCore::parse(clean_latest);

    if latest < current {
        return UpdateType::UpToDate;
    }

    if latest.major > current.major {
        UpdateType::Major
    } else if latest.minor > current.minor {
        UpdateType::Minor
    } else if latest.patch > current.patch {
        UpdateType::Patch
    } else {
        UpdateType::UpToDate
    }
}
