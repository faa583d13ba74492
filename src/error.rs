//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ValidationError: Issues with the submitted manifest text
//! - RegistryError: Issues with npm registry communication
//! - ConfigError: Issues with configuration files and CLI overrides
//! - IoError: Reading manifests and serving HTTP

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors produced while validating submitted manifest text.
///
/// The display strings are user-facing and end up verbatim in
/// `AnalysisResult::error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input was empty or whitespace only
    #[error("Please paste your package.json content")]
    EmptyInput,

    /// Input is not valid JSON
    #[error("JSON Error: {message}")]
    MalformedJson { message: String },

    /// Neither a dependencies nor a devDependencies map is present
    #[error("No dependencies or devDependencies found in your package.json")]
    NoDependencies,

    /// A dependency section is not a flat map of name to version string
    #[error("{message}")]
    InvalidDependencyShape { section: String, message: String },
}

/// Errors related to package registry communication
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for the expected schema
    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// A setting has an unusable value
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Failed to read a manifest from disk or stdin
    #[error("failed to read manifest {path}: {source}")]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to bind the HTTP listener
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP server stopped with an error
    #[error("server error: {source}")]
    Serve {
        #[source]
        source: std::io::Error,
    },

}

impl ValidationError {
    /// Creates a new MalformedJson error
    pub fn malformed_json(message: impl Into<String>) -> Self {
        ValidationError::MalformedJson {
            message: message.into(),
        }
    }

    /// Creates a new InvalidDependencyShape error
    pub fn invalid_shape(section: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidDependencyShape {
            section: section.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Returns true if the registry reported that the package does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::PackageNotFound { .. })
    }
}

impl ConfigError {
    /// Creates a new InvalidValue error
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl IoError {
    /// Creates a new ReadManifest error
    pub fn read_manifest(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::ReadManifest {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::EmptyInput.to_string(),
            "Please paste your package.json content"
        );
        assert_eq!(
            ValidationError::NoDependencies.to_string(),
            "No dependencies or devDependencies found in your package.json"
        );
        assert_eq!(
            ValidationError::malformed_json("expected value at line 1 column 1").to_string(),
            "JSON Error: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_validation_error_invalid_shape() {
        let err = ValidationError::invalid_shape("dependencies", "Dependencies must be an object");
        assert_eq!(err.to_string(), "Dependencies must be an object");
        if let ValidationError::InvalidDependencyShape { section, .. } = err {
            assert_eq!(section, "dependencies");
        } else {
            panic!("Expected InvalidDependencyShape variant");
        }
    }

    #[test]
    fn test_registry_error_package_not_found() {
        let err = RegistryError::package_not_found("nonexistent-package", "npm");
        let msg = format!("{}", err);
        assert!(msg.contains("package 'nonexistent-package' not found"));
        assert!(msg.contains("npm"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_registry_error_network() {
        let err = RegistryError::network_error("lodash", "npm", "HTTP 503 Service Unavailable");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to fetch"));
        assert!(msg.contains("HTTP 503"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_registry_error_invalid_response() {
        let err = RegistryError::invalid_response("lodash", "npm", "expected value");
        assert!(err.to_string().contains("invalid response from npm"));
    }

    #[test]
    fn test_registry_error_timeout() {
        let err = RegistryError::timeout("react", "npm");
        let msg = format!("{}", err);
        assert!(msg.contains("timeout"));
        assert!(msg.contains("react"));
    }

    #[test]
    fn test_config_error_invalid_value() {
        let err = ConfigError::invalid_value("batch.size", "must be greater than zero");
        let msg = format!("{}", err);
        assert!(msg.contains("batch.size"));
        assert!(msg.contains("greater than zero"));
    }

    #[test]
    fn test_io_error_read_manifest() {
        let err = IoError::read_manifest(
            "/missing/package.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().contains("failed to read manifest"));
    }

    #[test]
    fn test_app_error_from_validation_error() {
        let app_err: AppError = ValidationError::EmptyInput.into();
        assert_eq!(app_err.to_string(), "Please paste your package.json content");
    }

    #[test]
    fn test_app_error_from_registry_error() {
        let registry_err = RegistryError::package_not_found("pkg", "npm");
        let app_err: AppError = registry_err.into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("package 'pkg' not found"));
    }

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::invalid_value("server.bind", "bad address").into();
        assert!(app_err.to_string().contains("server.bind"));
    }
}
