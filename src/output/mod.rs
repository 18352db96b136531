//! Output module for harvest results
//!
//! This module handles:
//! - Writing the JSON artifact of matched apps
//! - Counting matched apps per target category
//! - Printing the end-of-run summary and record preview

mod json;
mod preview;
pub mod stats;

pub use json::{read_records, write_records};
pub use preview::{format_preview, truncate_chars};
pub use stats::{count_categories, print_run_summary, sorted_counts, CategoryCounts};
