//! In-memory registry used by unit tests

use super::{PackageMetadata, RegistryAdapter};
use crate::error::RegistryError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Lookup lifecycle event recorded by [`StubRegistry`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupEvent {
    Started(String),
    Finished(String),
}

/// Registry serving canned responses; unknown names are "not found"
#[derive(Default)]
pub struct StubRegistry {
    responses: HashMap<String, Result<PackageMetadata, RegistryError>>,
    latency: Duration,
    events: Mutex<Vec<LookupEvent>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl StubRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(self, name: &str, latest: &str) -> Self {
        self.with_metadata(PackageMetadata::new(name, latest))
    }

    pub fn with_metadata(mut self, metadata: PackageMetadata) -> Self {
        self.responses.insert(metadata.name.clone(), Ok(metadata));
        self
    }

    pub fn with_failure(mut self, name: &str, message: &str) -> Self {
        self.responses.insert(
            name.to_string(),
            Err(RegistryError::network_error(name, "npm", message)),
        );
        self
    }

    /// Make every lookup take this long
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn events(&self) -> Vec<LookupEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, LookupEvent::Started(_)))
            .count()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistryAdapter for StubRegistry {
    fn registry_name(&self) -> &'static str {
        "npm"
    }

    async fn fetch_package(&self, package: &str) -> Result<PackageMetadata, RegistryError> {
        self.events
            .lock()
            .unwrap()
            .push(LookupEvent::Started(package.to_string()));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.events
            .lock()
            .unwrap()
            .push(LookupEvent::Finished(package.to_string()));

        self.responses
            .get(package)
            .cloned()
            .unwrap_or_else(|| Err(RegistryError::package_not_found(package, "npm")))
    }
}
