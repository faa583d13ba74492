//! CLI argument parsing module for npm-analyzer

use crate::config::AnalyzerConfig;
use crate::error::ConfigError;
use crate::manifest::STDIN_PATH;
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Parse a batch size, rejecting zero up front
fn parse_batch_size(s: &str) -> Result<usize, String> {
    let size: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid batch size: {}", s))?;
    if size == 0 {
        return Err("batch size must be greater than zero".to_string());
    }
    Ok(size)
}

/// Classify available npm dependency updates
#[derive(Parser, Debug, Clone)]
#[command(
    name = "npm-analyzer",
    version,
    about = "Classify available npm dependency updates as patch, minor or major"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Read settings from a TOML file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Registry base URL (default: https://registry.npmjs.org)
    #[arg(long, global = true, value_name = "URL")]
    pub registry: Option<String>,

    /// Number of lookups issued concurrently per group
    #[arg(long, global = true, value_parser = parse_batch_size)]
    pub batch_size: Option<usize>,

    /// Pause between lookup groups, in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub batch_delay_ms: Option<u64>,

    /// Enable verbose output and debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output, warnings only
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze a package.json file and print the result
    Check(CheckArgs),
    /// Serve the analysis endpoint over HTTP
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Manifest to analyze; "-" reads stdin
    #[arg(default_value = STDIN_PATH)]
    pub path: PathBuf,

    /// Output the JSON export document
    #[arg(long, conflicts_with = "csv")]
    pub json: bool,

    /// Output CSV
    #[arg(long)]
    pub csv: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on (default: 127.0.0.1:3000)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<SocketAddr>,
}

impl CliArgs {
    /// Load the config file (if any) and apply flag overrides
    pub fn load_config(&self) -> Result<AnalyzerConfig, ConfigError> {
        let mut config = AnalyzerConfig::load(self.global.config.as_deref())?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Overwrite config values with any flags given on the command line
    pub fn apply_overrides(&self, config: &mut AnalyzerConfig) {
        if let Some(ref url) = self.global.registry {
            config.registry.url = url.clone();
        }
        if let Some(size) = self.global.batch_size {
            config.batch.size = size;
        }
        if let Some(delay) = self.global.batch_delay_ms {
            config.batch.delay_ms = delay;
        }
        if let Command::Serve(ServeArgs { bind: Some(bind) }) = &self.command {
            config.server.bind = *bind;
        }
    }

    /// Default tracing filter for the chosen verbosity
    pub fn log_filter(&self) -> &'static str {
        if self.global.quiet {
            "npm_analyzer=warn"
        } else if self.global.verbose {
            "npm_analyzer=debug"
        } else {
            "npm_analyzer=info"
        }
    }
}
