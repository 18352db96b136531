//! Catalog-Sieve main entry point
//!
//! This is the command-line interface for the Catalog-Sieve harvester.

use catalog_sieve::config::{load_config_with_hash, validate, Config};
use catalog_sieve::crawler::run_harvest;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog-Sieve: a polite app-store catalog harvester
///
/// Catalog-Sieve walks the paginated game catalog, extracts each app's
/// metadata and keeps only the apps in the configured target categories.
/// Matches are written to a JSON file and summarized on the console.
#[derive(Parser, Debug)]
#[command(name = "catalog-sieve")]
#[command(version = "1.0.0")]
#[command(about = "A polite app-store catalog harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Number of catalog listing pages to walk
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Pause after every request, in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Where to write the matched apps as JSON
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Validate config and show what would be harvested without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, &cli);

    // Overrides may produce an invalid config
    if let Err(e) = validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let result = run_harvest(config).await?;
    tracing::info!(
        "Harvest finished: {} apps matched in {} seconds",
        result.records.len(),
        result.duration_seconds()
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_sieve=info,warn"),
            1 => EnvFilter::new("catalog_sieve=debug,info"),
            2 => EnvFilter::new("catalog_sieve=trace,debug"),
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

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.request_delay_ms = delay_ms;
    }
    if let Some(output) = &cli.output {
        config.output.path = output.display().to_string();
    }
}

/// Handles the --dry-run mode: shows what would be harvested
fn handle_dry_run(config: &Config) {
    println!("=== Catalog-Sieve Dry Run ===\n");

    println!("Site:");
    println!("  Catalog: {}", config.catalog_url());
    println!("  Detail pages: {}<app-id>", config.detail_url(""));

    println!("\nCrawler Configuration:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Delay after each request: {}ms", config.crawler.request_delay_ms);
    println!(
        "  Timeouts: listing {}s, detail {}s",
        config.crawler.listing_timeout_secs, config.crawler.detail_timeout_secs
    );

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.user_agent);
    println!("  Accept-Language: {}", config.user_agent.accept_language);

    println!("\nListing Pages ({}):", config.crawler.max_pages);
    for page in 1..=config.crawler.max_pages {
        println!("  - {}", config.listing_url(page));
    }

    println!(
        "\nTarget Categories ({}):",
        config.filter.target_categories.len()
    );
    for category in &config.filter.target_categories {
        println!("  - {}", category);
    }

    println!("\nOutput: {}", config.output.path);

    println!("\n✓ Configuration is valid");
}
