//! Configuration module for Catalog-Sieve
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration is created once at startup and passed explicitly to the
//! coordinator; there is no ambient global state.
//!
//! # Example
//!
//! ```no_run
//! use catalog_sieve::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sieve.toml")).unwrap();
//! println!("Will walk {} catalog pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FilterConfig, OutputConfig, SiteConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
