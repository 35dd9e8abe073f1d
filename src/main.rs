//! sbf-questions main entry point
//!
//! Command-line interface for scraping and validating the SBF-See question
//! catalogue.

use anyhow::Context;
use clap::{Parser, Subcommand};
use sbf_questions::config::{load_or_default, Config};
use sbf_questions::scrape::run_scrape;
use sbf_questions::validate::{validate_directory, write_bundled_schema};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// sbf-questions: SBF-See exam question scraper and validator
#[derive(Parser, Debug)]
#[command(name = "sbf-questions")]
#[command(version)]
#[command(about = "Scrape and validate SBF-See exam questions", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in ELWIS settings if omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape all configured categories and write YAML documents
    Scrape,

    /// Validate every YAML document in a directory against its schema
    Validate {
        /// Directory holding the documents (defaults to the configured output directory)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Write the bundled JSON Schema into the output directory
    WriteSchema {
        /// Overwrite an existing schema file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Invalid built-in configuration".to_string(),
    })?;

    match cli.command {
        Command::Scrape => handle_scrape(&config).await,
        Command::Validate { dir } => handle_validate(&config, dir),
        Command::WriteSchema { force } => handle_write_schema(&config, force),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sbf_questions=info,warn"),
            1 => EnvFilter::new("sbf_questions=debug,info"),
            2 => EnvFilter::new("sbf_questions=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `scrape`: runs every category and prints the summary
async fn handle_scrape(config: &Config) -> anyhow::Result<ExitCode> {
    tracing::info!(
        "Scraping {} categories into {}",
        config.categories.len(),
        config.output.directory.display()
    );

    let summary = run_scrape(config).await.context("Scrape failed")?;
    summary.print(&config.output.directory);

    Ok(ExitCode::SUCCESS)
}

/// Handles `validate`: exit code 0 only if every document is valid
fn handle_validate(config: &Config, dir: Option<PathBuf>) -> anyhow::Result<ExitCode> {
    let dir = dir.unwrap_or_else(|| config.output.directory.clone());

    match validate_directory(&dir, &config.output.schema_file) {
        Ok(report) => {
            report.print();
            Ok(if report.all_valid() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Handles `write-schema`
fn handle_write_schema(config: &Config, force: bool) -> anyhow::Result<ExitCode> {
    let path = config.output.schema_path();

    if path.exists() && !force {
        println!("Schema already exists at {} (use --force to overwrite)", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    write_bundled_schema(&path)
        .with_context(|| format!("Failed to write schema to {}", path.display()))?;
    println!("✓ Schema written to {}", path.display());

    Ok(ExitCode::SUCCESS)
}
