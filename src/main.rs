//! npm-analyzer - classify available npm dependency updates
//!
//! Subcommands:
//! - `check [PATH]` analyzes a package.json file (or stdin)
//! - `serve` runs the HTTP analysis endpoint

use anyhow::Context;
use clap::Parser;
use npm_analyzer::cli::{CheckArgs, CliArgs, Command};
use npm_analyzer::config::AnalyzerConfig;
use npm_analyzer::domain::AnalysisResult;
use npm_analyzer::manifest::read_manifest;
use npm_analyzer::orchestrator::Analyzer;
use npm_analyzer::output::{create_formatter, OutputConfig};
use npm_analyzer::server;
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.log_filter());

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over the verbosity flags
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = args.load_config()?;
    let analyzer = Analyzer::from_config(&config)?;

    match args.command {
        Command::Check(ref check) => run_check(&args, check, &analyzer).await,
        Command::Serve(_) => run_serve(analyzer, &config).await,
    }
}

async fn run_check(
    args: &CliArgs,
    check: &CheckArgs,
    analyzer: &Analyzer,
) -> anyhow::Result<ExitCode> {
    let raw = read_manifest(&check.path)?;

    let show_progress = !args.global.quiet && io::stderr().is_terminal();
    let result = analyzer
        .run_with_progress(&raw, show_progress)
        .await
        .unwrap_or_else(|e| AnalysisResult::failed(e.to_string()));

    let mut output_config =
        OutputConfig::from_cli(check.json, check.csv, args.global.verbose, args.global.quiet);
    if check.output.is_some() || !io::stdout().is_terminal() {
        output_config = output_config.without_color();
    }
    let formatter = create_formatter(output_config);

    match check.output {
        Some(ref path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            formatter.format(&result, &mut writer)?;
            writer.flush()?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            formatter.format(&result, &mut stdout)?;
            stdout.flush()?;
        }
    }

    if result.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn run_serve(analyzer: Analyzer, config: &AnalyzerConfig) -> anyhow::Result<ExitCode> {
    server::serve(analyzer, config.server.bind).await?;
    Ok(ExitCode::SUCCESS)
}
