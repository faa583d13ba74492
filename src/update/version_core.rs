//! Loose version parsing
//!
//! Version strings from manifests are not required to be valid semver:
//! range operators, `v` prefixes, tags and pre-release suffixes all appear in
//! practice. Parsing never fails; anything unreadable degrades to zero.

use regex::Regex;
use std::sync::LazyLock;

/// Everything before the first digit (range operators, `v`, `workspace:`, ...)
static LEADING_NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^0-9]*").expect("valid regex"));

/// Strip range operators and prefixes, then drop any `-pre` / `+build` suffix
///
/// `"^1.2.3"` → `"1.2.3"`, `">=2.0.0-beta.1"` → `"2.0.0"`, `"latest"` → `""`
pub fn clean_version(version: &str) -> &str {
    let start = LEADING_NON_DIGITS
        .find(version)
        .map(|m| m.end())
        .unwrap_or(0);
    let core = &version[start..];
    core.split(['+', '-']).next().unwrap_or(core)
}

/// The numeric `major.minor.patch` triple of a cleaned version string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct VersionCore {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl VersionCore {
    /// Creates a new version core
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse the first three dot-separated components of a cleaned version
    pub fn parse(cleaned: &str) -> Self {
        let mut parts = cleaned.split('.').map(parse_component);
        Self {
            major: parts.next().unwrap_or(0),
            minor: parts.next().unwrap_or(0),
            patch: parts.next().unwrap_or(0),
        }
    }
}

/// Leading-digit integer parse: "3" → 3, "3x" → 3, "x" → 0, "" → 0
fn parse_component(part: &str) -> u64 {
    part.trim_start()
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(u64::from(d)))
}
