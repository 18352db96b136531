use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reads a TOML configuration file, fills unset keys with defaults and validates it
///
/// # Returns
///
/// * `Ok(Config)` - The validated configuration
/// * `Err(ConfigError::Io)` - The file could not be read
/// * `Err(ConfigError::Parse)` - The file is not valid TOML for [`Config`]
/// * `Err(ConfigError::Validation | ConfigError::InvalidUrl)` - A value is out of range
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use catalog_sieve::config::load_config;
///
/// let config = load_config(Path::new("sieve.toml")).unwrap();
/// println!("First listing page: {}", config.listing_url(1));
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration text
///
/// An empty document is valid and yields [`Config::default`].
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;

    tracing::debug!(
        "Catalog {} ({} pages), {} target categories",
        config.catalog_url(),
        config.crawler.max_pages,
        config.filter.target_categories.len()
    );
    Ok(config)
}

/// SHA-256 fingerprint (hex) of a configuration file
///
/// Logged at startup so an output file can be traced back to the settings
/// that produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(hash_content(&content))
}

/// Loads a configuration together with the fingerprint of the exact text parsed
///
/// The file is read once, so the hash always matches the returned config.
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(&content)))
}

fn hash_content(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
