//! Crawler module for catalog discovery and run coordination
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching of listing and detail pages
//! - Listing page parsing into app identifiers
//! - The rate-limit policy applied between requests
//! - Overall run coordination

mod coordinator;
mod fetcher;
mod paginator;
pub mod throttle;

pub use coordinator::{Coordinator, RunResult};
pub use fetcher::{build_http_client, PageFetcher, RequestKind};
pub use paginator::{list_page, parse_listing, CatalogPage};
pub use throttle::{FixedDelay, RatePolicy};

use crate::config::Config;
use crate::output::print_run_summary;
use crate::HarvestError;

/// Runs a complete harvest and prints its summary
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client
/// 2. Walk the catalog listing pages
/// 3. Extract and filter every discovered app
/// 4. Write the JSON artifact when anything matched
/// 5. Print the category histogram and a record preview
///
/// # Example
///
/// ```no_run
/// use catalog_sieve::config::Config;
/// use catalog_sieve::crawler::run_harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let result = run_harvest(Config::default()).await?;
/// println!("{} apps matched", result.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: Config) -> Result<RunResult, HarvestError> {
    let coordinator = Coordinator::new(config)?;
    let result = coordinator.run().await?;
    print_run_summary(&result, coordinator.config());
    Ok(result)
}
