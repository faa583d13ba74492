//! Registry adapters for fetching package metadata
//!
//! This module provides:
//! - HTTP client shared foundation
//! - npm Registry adapter
//! - Single lookups that never fail (errors become a `LookupOutcome`)
//! - Batched, paced resolution of many package names

mod batch;
mod client;
mod npm;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{BatchResolver, DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE};
pub use client::{HttpClient, DEFAULT_TIMEOUT};
pub use npm::{NpmAdapter, NPM_REGISTRY_URL};

use crate::error::RegistryError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Published metadata for one package
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PackageMetadata {
    /// Package name as reported by the registry
    pub name: String,
    /// The `latest` dist-tag, if the registry reports one
    pub latest_version: Option<String>,
    pub description: Option<String>,
    pub homepage: Option<String>,
    /// SPDX identifier or free-form license string
    pub license: Option<String>,
    /// Publish timestamp of the latest version
    pub published_at: Option<String>,
}

impl PackageMetadata {
    /// Creates metadata with only a name and latest version
    pub fn new(name: impl Into<String>, latest_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latest_version: Some(latest_version.into()),
            ..Self::default()
        }
    }
}

/// Result of resolving a single package name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The registry returned metadata
    Found(PackageMetadata),
    /// The registry reported that the package does not exist
    NotFound,
    /// The lookup failed for any other reason
    Failed(String),
}

impl LookupOutcome {
    /// Returns the metadata if the package was found
    pub fn metadata(&self) -> Option<&PackageMetadata> {
        match self {
            LookupOutcome::Found(metadata) => Some(metadata),
            _ => None,
        }
    }

    /// Returns true unless metadata was found
    pub fn is_absent(&self) -> bool {
        !matches!(self, LookupOutcome::Found(_))
    }
}

/// Trait for registry adapters
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch metadata for a package
    async fn fetch_package(&self, package: &str) -> Result<PackageMetadata, RegistryError>;
}

/// Resolve one package name, absorbing every error into the outcome
pub async fn resolve_one(adapter: &dyn RegistryAdapter, package: &str) -> LookupOutcome {
    match adapter.fetch_package(package).await {
        Ok(metadata) => LookupOutcome::Found(metadata),
        Err(e) if e.is_not_found() => LookupOutcome::NotFound,
        Err(e) => {
            warn!(package, registry = adapter.registry_name(), error = %e, "registry lookup failed");
            LookupOutcome::Failed(e.to_string())
        }
    }
}
