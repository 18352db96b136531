//! Harvest coordinator - main run orchestration logic
//!
//! A run is a strictly sequential pipeline with three phases:
//! 1. Discovery: walk listing pages 1..=max_pages and collect app identifiers
//! 2. Extraction: fetch each detail page, build records, keep target matches
//! 3. Reporting: write the JSON artifact and tally matches per category
//!
//! The rate-limit policy is applied after every network call. Page and app
//! failures are turned into skips here; only output errors abort the run.

use crate::config::Config;
use crate::crawler::throttle::{pause, FixedDelay, RatePolicy};
use crate::crawler::{list_page, PageFetcher, RequestKind};
use crate::extract::extract_app;
use crate::filter::CategoryFilter;
use crate::output::{count_categories, write_records, CategoryCounts};
use crate::record::AppRecord;
use crate::HarvestError;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;

/// Outcome of one harvest run
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Matched records in discovery order
    pub records: Vec<AppRecord>,

    /// Matched apps per target category
    pub category_counts: CategoryCounts,

    /// Listing pages fetched successfully
    pub pages_fetched: u32,

    /// Listing pages that failed to fetch
    pub pages_failed: u32,

    /// App identifiers collected during discovery, duplicates included
    pub discovered: usize,

    /// Apps whose detail page failed to fetch or had no application node
    pub apps_skipped: usize,

    /// Apps extracted successfully but outside the target categories
    pub apps_filtered_out: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Where the artifact was written; `None` when nothing matched
    pub output_path: Option<PathBuf>,
}

impl RunResult {
    /// Wall-clock duration of the run in whole seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Identifiers collected during discovery
struct Discovery {
    app_ids: Vec<String>,
    pages_fetched: u32,
    pages_failed: u32,
}

/// Records kept during extraction
struct Extraction {
    records: Vec<AppRecord>,
    skipped: usize,
    filtered_out: usize,
}

/// Main harvest coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    fetcher: PageFetcher,
    filter: CategoryFilter,
    policy: Box<dyn RatePolicy>,
}

impl Coordinator {
    /// Creates a coordinator that pauses a fixed interval after each request
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let policy = FixedDelay::from_millis(config.crawler.request_delay_ms);
        Self::with_policy(config, Box::new(policy))
    }

    /// Creates a coordinator with a custom rate-limit policy
    pub fn with_policy(config: Config, policy: Box<dyn RatePolicy>) -> Result<Self, HarvestError> {
        let fetcher = PageFetcher::new(&config)?;
        let filter = CategoryFilter::new(config.filter.target_categories.iter().cloned());

        Ok(Self {
            config: Arc::new(config),
            fetcher,
            filter,
            policy,
        })
    }

    /// The configuration this coordinator runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs discovery, extraction and reporting
    ///
    /// # Returns
    ///
    /// * `Ok(RunResult)` - The run completed; skipped pages and apps are counted
    /// * `Err(HarvestError)` - Writing the artifact failed
    pub async fn run(&self) -> Result<RunResult, HarvestError> {
        let started_at = Utc::now();
        tracing::info!(
            "Starting harvest of {} catalog pages from {}",
            self.config.crawler.max_pages,
            self.config.catalog_url()
        );

        let discovery = self.discover().await;
        tracing::info!(
            "Discovered {} app identifiers to check",
            discovery.app_ids.len()
        );

        let extraction = self.extract_all(&discovery.app_ids).await;
        tracing::info!(
            "{} apps matched the target categories",
            extraction.records.len()
        );

        let category_counts = count_categories(&extraction.records, &self.filter);

        let output_path = if extraction.records.is_empty() {
            tracing::info!("No apps matched the target categories; no output written");
            None
        } else {
            let path = PathBuf::from(&self.config.output.path);
            write_records(&path, &extraction.records)?;
            tracing::info!(
                "Saved {} records to {}",
                extraction.records.len(),
                path.display()
            );
            Some(path)
        };

        Ok(RunResult {
            records: extraction.records,
            category_counts,
            pages_fetched: discovery.pages_fetched,
            pages_failed: discovery.pages_failed,
            discovered: discovery.app_ids.len(),
            apps_skipped: extraction.skipped,
            apps_filtered_out: extraction.filtered_out,
            started_at,
            finished_at: Utc::now(),
            output_path,
        })
    }

    /// Walks every listing page and collects app identifiers
    ///
    /// A page that fails to fetch contributes nothing and the walk goes on.
    /// Identifiers are not de-duplicated across pages.
    async fn discover(&self) -> Discovery {
        let mut discovery = Discovery {
            app_ids: Vec::new(),
            pages_fetched: 0,
            pages_failed: 0,
        };

        for index in 1..=self.config.crawler.max_pages {
            let result = list_page(&self.fetcher, &self.config, index).await;
            let succeeded = result.is_ok();

            match result {
                Ok(page) => {
                    tracing::info!(
                        "Found {} apps on catalog page {} ({})",
                        page.app_ids.len(),
                        page.index,
                        page.url
                    );
                    discovery.pages_fetched += 1;
                    discovery.app_ids.extend(page.app_ids);
                }
                Err(e) => {
                    tracing::warn!("Skipping catalog page {}: {}", index, e);
                    discovery.pages_failed += 1;
                }
            }

            pause(self.policy.as_ref(), RequestKind::Listing, succeeded).await;
        }

        discovery
    }

    /// Extracts each app in order and keeps the ones in a target category
    async fn extract_all(&self, app_ids: &[String]) -> Extraction {
        let mut extraction = Extraction {
            records: Vec::new(),
            skipped: 0,
            filtered_out: 0,
        };

        let total = app_ids.len();
        let interval = self.config.crawler.progress_interval.max(1);
        let start_time = std::time::Instant::now();

        for (checked, app_id) in app_ids.iter().enumerate() {
            let url = self.config.detail_url(app_id);
            let result = extract_app(&self.fetcher, &url, app_id).await;
            let succeeded = result.is_ok();

            match result {
                Ok(record) if self.filter.matches(&record) => {
                    tracing::debug!("Matched {} ({})", record.name, app_id);
                    extraction.records.push(record);
                }
                Ok(record) => {
                    tracing::debug!(
                        "Skipping {}: categories {:?} are not targets",
                        app_id,
                        record.categories
                    );
                    extraction.filtered_out += 1;
                }
                Err(e) => {
                    tracing::debug!("Skipping {}: {}", app_id, e);
                    extraction.skipped += 1;
                }
            }

            pause(self.policy.as_ref(), RequestKind::Detail, succeeded).await;

            let done = checked + 1;
            if done % interval == 0 || done == total {
                let rate = done as f64 / start_time.elapsed().as_secs_f64().max(f64::EPSILON);
                tracing::info!(
                    "Progress: {}/{} apps checked, {} matched, {:.2} apps/sec",
                    done,
                    total,
                    extraction.records.len(),
                    rate
                );
            }
        }

        extraction
    }
}
