//! doc-outline main entry point
//!
//! This is the command-line interface for the documentation outline extractor.

use anyhow::Context;
use clap::Parser;
use doc_outline::config::{load_config, validate, Config};
use doc_outline::output::{to_json, write_json};
use doc_outline::{run, Module, OutlineError};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// doc-outline: extract a module outline from a documentation site
///
/// doc-outline crawls a documentation website starting from URL, follows
/// same-domain links, and prints the modules and submodules it finds as JSON.
#[derive(Parser, Debug)]
#[command(name = "doc-outline")]
#[command(version = "1.0.0")]
#[command(about = "Extract a module outline from a documentation site", long_about = None)]
struct Cli {
    /// Documentation URL to start from
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to fetch (overrides the config file)
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Per-request timeout in seconds (overrides the config file)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Write JSON to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Disable aggressive submodule detection
    #[arg(long)]
    no_aggressive: bool,

    /// Strip more page chrome and parse at most 20 pages
    #[arg(long)]
    quick: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    tracing::info!(
        "Extracting from {} (max {} pages, aggressive: {}, quick: {})",
        cli.url,
        config.crawler.max_pages,
        config.extractor.aggressive,
        config.extractor.quick_mode
    );

    match run(&cli.url, &config).await {
        Ok(output) => {
            if !cli.quiet {
                eprintln!("{}", output.summary.format());
            }
            emit(&output.modules, cli.output.as_deref())
        }
        Err(e @ OutlineError::NoPages { .. }) => {
            tracing::error!("{}", e);
            emit(&[], cli.output.as_deref())?;
            Err(e.into())
        }
        Err(e) => Err(anyhow::Error::new(e).context(format!("Failed to process {}", cli.url))),
    }
}

/// Loads the config file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.timeout_secs = timeout;
    }
    if cli.no_aggressive {
        config.extractor.aggressive = false;
    }
    if cli.quick {
        config.extractor.quick_mode = true;
    }

    validate(&config).context("Invalid command-line options")?;
    Ok(config)
}

/// Writes the JSON outline to a file or stdout
fn emit(modules: &[Module], output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => write_json(path, modules)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{}", to_json(modules)?);
            Ok(())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("doc_outline=info,warn"),
            1 => EnvFilter::new("doc_outline=debug,info"),
            2 => EnvFilter::new("doc_outline=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
