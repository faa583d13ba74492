//! Analysis orchestrator
//!
//! This module provides:
//! - Workflow coordination: validate → flatten → resolve → classify → summarize
//! - Batched registry resolution through `BatchResolver`
//! - Per-dependency fault isolation (a failed lookup degrades one row only)

use crate::config::AnalyzerConfig;
use crate::domain::{AnalysisResult, ClassifiedDependency, DependencyCandidate, UNKNOWN_VERSION};
use crate::error::{RegistryError, ValidationError};
use crate::manifest;
use crate::progress::Progress;
use crate::registry::{BatchResolver, HttpClient, LookupOutcome, NpmAdapter, RegistryAdapter};
use crate::update::classify;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Reasons an analysis stops before any registry lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// No manifest text was submitted
    #[error("No package.json content provided")]
    NoInput,

    /// The manifest text failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The manifest validated but lists nothing to analyze
    #[error("No dependencies found to analyze")]
    NoDependencies,
}

/// Runs analyses against one registry
///
/// Holds no per-analysis state; one instance can serve concurrent requests.
#[derive(Clone)]
pub struct Analyzer {
    resolver: BatchResolver,
}

impl Analyzer {
    /// Create an analyzer around a configured resolver
    pub fn new(resolver: BatchResolver) -> Self {
        Self { resolver }
    }

    /// Create an analyzer with default batching for the given adapter
    pub fn with_adapter(adapter: Arc<dyn RegistryAdapter>) -> Self {
        Self::new(BatchResolver::new(adapter))
    }

    /// Create an npm analyzer from configuration
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, RegistryError> {
        let client = HttpClient::with_timeout(config.timeout())?;
        let adapter = NpmAdapter::with_base_url(client, &config.registry.url);
        let resolver = BatchResolver::new(Arc::new(adapter))
            .with_batch_size(config.batch.size)
            .with_batch_delay(config.batch_delay());
        Ok(Self::new(resolver))
    }

    /// Analyze manifest text, folding failures into the result
    pub async fn analyze(&self, raw: &str) -> AnalysisResult {
        self.run(raw)
            .await
            .unwrap_or_else(|e| AnalysisResult::failed(e.to_string()))
    }

    /// Analyze manifest text
    pub async fn run(&self, raw: &str) -> Result<AnalysisResult, AnalysisError> {
        self.run_with_progress(raw, false).await
    }

    /// Analyze manifest text with optional progress display
    pub async fn run_with_progress(
        &self,
        raw: &str,
        show_progress: bool,
    ) -> Result<AnalysisResult, AnalysisError> {
        if raw.is_empty() {
            return Err(AnalysisError::NoInput);
        }

        // Step 1: Validate and flatten
        let manifest = manifest::validate(raw)?;
        let candidates = manifest.candidates();
        if candidates.is_empty() {
            return Err(AnalysisError::NoDependencies);
        }

        // Step 2: Resolve each distinct name once
        let names = distinct_names(&candidates);
        debug!(
            candidates = candidates.len(),
            distinct = names.len(),
            batches = self.resolver.batch_count(names.len()),
            "resolving dependencies"
        );

        let mut progress = Progress::new(show_progress);
        progress.start(names.len() as u64, "Checking dependencies");
        let outcomes = self
            .resolver
            .resolve_many_with(&names, |name, _| {
                progress.set_message(&format!("Checking {}", name));
                progress.inc();
            })
            .await;
        progress.finish_and_clear();

        // Step 3: Classify in candidate order
        let dependencies: Vec<ClassifiedDependency> = candidates
            .iter()
            .map(|candidate| classify_candidate(candidate, &outcomes))
            .collect();

        let result = AnalysisResult::completed(dependencies);
        info!(
            total = result.total(),
            with_updates = result.with_updates(),
            unresolved = result.unresolved().count(),
            "analysis complete"
        );

        Ok(result)
    }
}

/// Order-preserving distinct candidate names
fn distinct_names(candidates: &[DependencyCandidate]) -> Vec<String> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .filter(|c| seen.insert(c.name.as_str()))
        .map(|c| c.name.clone())
        .collect()
}

/// Pair a candidate with its lookup outcome
fn classify_candidate(
    candidate: &DependencyCandidate,
    outcomes: &HashMap<String, LookupOutcome>,
) -> ClassifiedDependency {
    match outcomes.get(&candidate.name) {
        None | Some(LookupOutcome::NotFound) => ClassifiedDependency::not_found(candidate),
        Some(LookupOutcome::Failed(message)) => {
            ClassifiedDependency::lookup_failed(candidate, message)
        }
        Some(LookupOutcome::Found(metadata)) => {
            let latest = metadata
                .latest_version
                .clone()
                .unwrap_or_else(|| UNKNOWN_VERSION.to_string());
            let update_type = classify(&candidate.declared_range, &latest);
            ClassifiedDependency::resolved(candidate, latest, update_type).with_details(
                metadata.description.clone(),
                metadata.homepage.clone(),
                metadata.license.clone(),
                metadata.published_at.clone(),
            )
        }
    }
}
