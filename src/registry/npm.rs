//! npm Registry adapter
//!
//! Fetches package metadata from the npm registry.
//! API endpoint: https://registry.npmjs.org/{package}

use crate::error::RegistryError;
use crate::registry::{HttpClient, PackageMetadata, RegistryAdapter};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// npm registry base URL
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// npm Registry adapter
pub struct NpmAdapter {
    client: HttpClient,
    base_url: String,
}

/// npm package document (only the fields we read)
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    name: Option<String>,
    #[serde(rename = "dist-tags", default)]
    dist_tags: NpmDistTags,
    description: Option<String>,
    homepage: Option<String>,
    /// Either "MIT" or the legacy `{ "type": "MIT", "url": ... }` form
    license: Option<Value>,
    /// Publish time per version, plus "created"/"modified"
    #[serde(default)]
    time: HashMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct NpmDistTags {
    latest: Option<String>,
}

impl NpmAdapter {
    /// Create a new npm adapter against the public registry
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, NPM_REGISTRY_URL)
    }

    /// Create a new npm adapter against a custom registry (mirror or test server)
    pub fn with_base_url(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the URL for a package; scoped names are percent-encoded
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(package))
    }
}

impl NpmPackageResponse {
    fn into_metadata(self, requested: &str) -> PackageMetadata {
        let latest_version = self.dist_tags.latest;
        let published_at = latest_version
            .as_ref()
            .and_then(|v| self.time.get(v))
            .and_then(Value::as_str)
            .map(str::to_string);
        let license = self.license.as_ref().and_then(|value| match value {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map.get("type").and_then(Value::as_str).map(str::to_string),
            _ => None,
        });

        PackageMetadata {
            name: self.name.unwrap_or_else(|| requested.to_string()),
            latest_version,
            description: self.description,
            homepage: self.homepage,
            license,
            published_at,
        }
    }
}

#[async_trait]
impl RegistryAdapter for NpmAdapter {
    fn registry_name(&self) -> &'static str {
        "npm"
    }

    async fn fetch_package(&self, package: &str) -> Result<PackageMetadata, RegistryError> {
        let url = self.build_url(package);
        let response: NpmPackageResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        Ok(response.into_metadata(package))
    }
}
