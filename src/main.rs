//! Doc-Atlas main entry point
//!
//! Command-line interface for the documentation outline crawler.

use anyhow::Context;
use clap::Parser;
use doc_atlas::config::load_config;
use doc_atlas::crawler::Crawler;
use doc_atlas::output::{assemble_modules, write_json};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Doc-Atlas: a documentation outline crawler
///
/// Doc-Atlas crawls a documentation site within an allow-list of domains,
/// extracts the main content from each page, and infers a module/submodule
/// outline from the heading structure, written out as JSON.
#[derive(Parser, Debug)]
#[command(name = "doc-atlas")]
#[command(version = "1.0.0")]
#[command(about = "A documentation outline crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,

    /// Override the configured JSON output path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    if let Some(path) = &cli.output {
        config.output.json_path = path.display().to_string();
    }

    if cli.dry_run {
        print_crawl_plan(&config);
        return Ok(());
    }

    let crawler = Crawler::new(config.clone())?;
    let outcome = crawler.run().await?;

    if outcome.is_empty() {
        tracing::warn!("No pages were fetched; nothing to infer");
    }

    let modules = assemble_modules(&outcome);
    if modules.is_empty() {
        tracing::warn!("No modules could be inferred from the extracted content");
    }

    write_json(&modules, std::path::Path::new(&config.output.json_path))?;

    tracing::info!(
        "Done: {} page(s) crawled, {} module(s) inferred",
        outcome.len(),
        modules.len()
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("doc_atlas=info,warn"),
            1 => EnvFilter::new("doc_atlas=debug,info"),
            2 => EnvFilter::new("doc_atlas=trace,debug"),
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

/// Prints what the crawl would do, without fetching anything
fn print_crawl_plan(config: &doc_atlas::config::Config) {
    println!("=== Doc-Atlas Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Page budget: {}", config.crawler.max_pages);
    println!(
        "  Politeness delay: {}ms",
        config.crawler.politeness_delay_ms
    );
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);

    println!("\nAllowed Domains ({}):", config.site.allowed_domains.len());
    for domain in &config.site.allowed_domains {
        println!("  - {}", domain);
    }

    println!("\nSeed URLs ({}):", config.site.seeds.len());
    for seed in &config.site.seeds {
        println!("  - {}", seed);
    }

    println!("\nExtraction:");
    println!("  Content selector: {}", config.extraction.content_selector);
    println!("  Article selector: {}", config.extraction.article_selector);

    println!("\nOutput:");
    println!("  JSON path: {}", config.output.json_path);

    println!("\n✓ Configuration is valid");
}
