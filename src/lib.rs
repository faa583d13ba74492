//! npm-analyzer - npm dependency update analysis library
//!
//! This library validates `package.json` text, resolves the latest
//! published version of each dependency from the npm registry in paced
//! batches, and classifies each available update as patch, minor or major.
//!
//! Entry points:
//! - [`orchestrator::Analyzer`] for running an analysis
//! - [`server::router`] for the HTTP endpoint
//! - [`output::create_formatter`] for text, JSON and CSV reports

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod server;
pub mod update;
