//! package.json validation
//!
//! Handles:
//! - dependencies
//! - devDependencies
//!
//! Other sections (peerDependencies, optionalDependencies, ...) are ignored.

use crate::domain::DependencyCandidate;
use crate::error::ValidationError;
use serde_json::{Map, Value};

const DEPENDENCIES_KEY: &str = "dependencies";
const DEV_DEPENDENCIES_KEY: &str = "devDependencies";

/// A validated manifest: name → declared range, in declared order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedManifest {
    /// Production dependencies
    pub dependencies: Vec<(String, String)>,
    /// Development dependencies
    pub dev_dependencies: Vec<(String, String)>,
}

impl ParsedManifest {
    /// Flatten into candidates: production entries first, then development
    pub fn candidates(&self) -> Vec<DependencyCandidate> {
        let production = self
            .dependencies
            .iter()
            .map(|(name, range)| DependencyCandidate::production(name, range));
        let development = self
            .dev_dependencies
            .iter()
            .map(|(name, range)| DependencyCandidate::development(name, range));
        production.chain(development).collect()
    }

    /// Total number of entries across both sections
    pub fn len(&self) -> usize {
        self.dependencies.len() + self.dev_dependencies.len()
    }

    /// Returns true if both sections are empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Validate raw package.json text
pub fn validate(content: &str) -> Result<ParsedManifest, ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let json: Value =
        serde_json::from_str(content).map_err(|e| ValidationError::malformed_json(e.to_string()))?;

    let Some(root) = json.as_object() else {
        return Err(ValidationError::NoDependencies);
    };

    let dependencies = section(root, DEPENDENCIES_KEY);
    let dev_dependencies = section(root, DEV_DEPENDENCIES_KEY);

    if is_missing_or_empty(dependencies) && is_missing_or_empty(dev_dependencies) {
        return Err(ValidationError::NoDependencies);
    }

    Ok(ParsedManifest {
        dependencies: parse_dependency_object(dependencies, DEPENDENCIES_KEY, "Dependencies")?,
        dev_dependencies: parse_dependency_object(
            dev_dependencies,
            DEV_DEPENDENCIES_KEY,
            "DevDependencies",
        )?,
    })
}

/// Look up a section, treating `null` as absent
fn section<'a>(root: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    root.get(key).filter(|v| !v.is_null())
}

fn is_missing_or_empty(value: Option<&Value>) -> bool {
    match value {
        None => true,
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}

fn parse_dependency_object(
    value: Option<&Value>,
    key: &str,
    label: &str,
) -> Result<Vec<(String, String)>, ValidationError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };

    let map = value
        .as_object()
        .ok_or_else(|| ValidationError::invalid_shape(key, format!("{} must be an object", label)))?;

    map.iter()
        .map(|(name, version)| match version.as_str() {
            Some(range) => Ok((name.clone(), range.to_string())),
            None => Err(ValidationError::invalid_shape(
                key,
                format!("{} entry '{}' must be a version string", label, name),
            )),
        })
        .collect()
}
