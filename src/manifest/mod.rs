//! Manifest reading and validation
//!
//! This module provides functionality to:
//! - Read manifest text from a file or stdin
//! - Validate package.json text into production and development maps
//! - Flatten the validated maps into an ordered candidate list

mod package_json;

pub use package_json::{validate, ParsedManifest};

use crate::error::IoError;
use std::io::Read;
use std::path::Path;

/// Path argument meaning "read from stdin"
pub const STDIN_PATH: &str = "-";

/// Read raw manifest text from a path, or from stdin when the path is "-"
pub fn read_manifest(path: &Path) -> Result<String, IoError> {
    if path.as_os_str() == STDIN_PATH {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| IoError::read_manifest(path, e))?;
        return Ok(content);
    }

    std::fs::read_to_string(path).map_err(|e| IoError::read_manifest(path, e))
}
