//! Core domain models for npm-analyzer
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency candidates flattened from a manifest
//! - Update type classification
//! - Per-dependency classification results
//! - The aggregate analysis result returned to callers

mod analysis;
mod candidate;
mod classified;
mod update_type;

pub use analysis::AnalysisResult;
pub use candidate::DependencyCandidate;
pub use classified::{ClassifiedDependency, LOOKUP_FAILED_PREFIX, NOT_FOUND_MESSAGE, UNKNOWN_VERSION};
pub use update_type::UpdateType;
