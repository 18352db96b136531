//! Run statistics and console summary
//!
//! This module counts matched apps per target category and prints the
//! end-of-run report.

use crate::config::Config;
use crate::crawler::RunResult;
use crate::filter::CategoryFilter;
use crate::output::format_preview;
use crate::record::AppRecord;
use std::collections::{HashMap, HashSet};

/// Number of matched apps per target category, keyed by configured spelling
pub type CategoryCounts = HashMap<String, usize>;

/// Counts records per target category
///
/// A record adds one to every target category it lists; listing the same
/// category twice (in any letter case) still counts once. Categories that
/// are not targets are not counted.
pub fn count_categories(records: &[AppRecord], filter: &CategoryFilter) -> CategoryCounts {
    let mut counts = CategoryCounts::new();

    for record in records {
        let targets: HashSet<&str> = record
            .categories
            .iter()
            .filter_map(|c| filter.canonical(c))
            .collect();

        for target in targets {
            *counts.entry(target.to_string()).or_insert(0) += 1;
        }
    }

    counts
}

/// Returns counts sorted by count (descending), then by name
pub fn sorted_counts(counts: &CategoryCounts) -> Vec<(&str, usize)> {
    let mut sorted: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    sorted
}

/// Prints the run summary to stdout in a formatted manner
pub fn print_run_summary(result: &RunResult, config: &Config) {
    println!("=== Catalog Harvest Summary ===\n");

    println!("Overview:");
    println!(
        "  Listing pages fetched: {} ({} failed)",
        result.pages_fetched, result.pages_failed
    );
    println!("  App identifiers discovered: {}", result.discovered);
    println!(
        "  Apps skipped (fetch or extraction failure): {}",
        result.apps_skipped
    );
    println!("  Apps outside target categories: {}", result.apps_filtered_out);
    println!("  Apps matched: {}", result.records.len());
    println!("  Duration: {} seconds", result.duration_seconds());
    println!();

    if result.records.is_empty() {
        println!("No apps matched the target categories");
        return;
    }

    println!("Matches by Category:");
    for (category, count) in sorted_counts(&result.category_counts) {
        println!("  - {}: {} apps", category, count);
    }
    println!();

    if let Some(path) = &result.output_path {
        println!("Results saved to: {}", path.display());
        println!();
    }

    println!("Sample Apps:");
    for (i, record) in result
        .records
        .iter()
        .take(config.output.preview_count)
        .enumerate()
    {
        println!(
            "{}",
            format_preview(i + 1, record, config.output.preview_description_chars)
        );
    }
}
