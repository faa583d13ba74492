//! Batched, paced resolution of many package names
//!
//! Names are split into fixed-size groups. Every lookup in a group runs
//! concurrently and the whole group settles before the next one starts, with
//! a fixed pause between adjacent groups. This caps outstanding requests at
//! the group size and spaces out bursts against the upstream registry.

use super::{resolve_one, LookupOutcome, RegistryAdapter};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default number of concurrent lookups per group
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Default pause between adjacent groups
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(100);

/// Resolves package names through a registry adapter in paced groups
#[derive(Clone)]
pub struct BatchResolver {
    adapter: Arc<dyn RegistryAdapter>,
    batch_size: usize,
    batch_delay: Duration,
}

impl BatchResolver {
    /// Create a resolver with the default group size and pause
    pub fn new(adapter: Arc<dyn RegistryAdapter>) -> Self {
        Self {
            adapter,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
        }
    }

    /// Set the group size (values below 1 are treated as 1)
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Set the pause between groups
    pub fn with_batch_delay(mut self, batch_delay: Duration) -> Self {
        self.batch_delay = batch_delay;
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn batch_delay(&self) -> Duration {
        self.batch_delay
    }

    /// Number of groups needed for `count` names
    pub fn batch_count(&self, count: usize) -> usize {
        count.div_ceil(self.batch_size)
    }

    /// Resolve every name; the map has one entry per unique name
    pub async fn resolve_many(&self, names: &[String]) -> HashMap<String, LookupOutcome> {
        self.resolve_many_with(names, |_, _| {}).await
    }

    /// Resolve every name, calling `on_settled` as each lookup's group settles
    ///
    /// Duplicate names are looked up independently; the last outcome wins.
    pub async fn resolve_many_with<F>(
        &self,
        names: &[String],
        mut on_settled: F,
    ) -> HashMap<String, LookupOutcome>
    where
        F: FnMut(&str, &LookupOutcome),
    {
        let mut results = HashMap::with_capacity(names.len());
        let total_batches = self.batch_count(names.len());

        for (index, batch) in names.chunks(self.batch_size).enumerate() {
            debug!(
                batch = index + 1,
                total_batches,
                size = batch.len(),
                registry = self.adapter.registry_name(),
                "resolving batch"
            );

            let lookups = batch
                .iter()
                .map(|name| resolve_one(self.adapter.as_ref(), name));
            let outcomes = join_all(lookups).await;

            for (name, outcome) in batch.iter().zip(outcomes) {
                on_settled(name, &outcome);
                results.insert(name.clone(), outcome);
            }

            if index + 1 < total_batches {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        results
    }
}
