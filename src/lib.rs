//! Catalog-Sieve: a polite app-store catalog harvester
//!
//! This crate walks the paginated game catalog of an app store, fetches each
//! app's detail page, extracts its metadata from embedded linked data and
//! rendered markup, and keeps only the apps whose categories intersect a
//! configured target set.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod filter;
pub mod output;
pub mod record;
pub mod text;

use thiserror::Error;

/// Top-level error type for a harvest run
///
/// Only these errors abort a run. Failures of individual listing or detail
/// pages are reported through [`FetchError`] and [`ExtractError`] and turned
/// into skips by the coordinator.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Transport-level failure of a single GET request
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },
}

/// Reasons a detail page carries no usable application node
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructuredDataError {
    #[error("No linked-data script element on page")]
    MissingScript,

    #[error("Malformed linked data: {0}")]
    Malformed(String),

    #[error("No SoftwareApplication node in linked data")]
    NoApplicationNode,
}

/// Failure of one app extraction
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    StructuredData(#[from] StructuredDataError),
}

/// Errors raised while writing the output artifact
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for single page fetches
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_harvest, Coordinator, RunResult};
pub use filter::CategoryFilter;
pub use record::{AppRecord, Developer};
