use crate::config::types::{
    Config, CrawlerConfig, FilterConfig, OutputConfig, SiteConfig, UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_filter_config(&config.filter)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the target site layout
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.base_url.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base_url '{}' must not end with '/'",
            config.base_url
        )));
    }

    validate_path("catalog_path", &config.catalog_path)?;
    validate_path("app_path_prefix", &config.app_path_prefix)?;

    if !config.app_path_prefix.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "app_path_prefix must end with '/', got '{}'",
            config.app_path_prefix
        )));
    }

    if config.page_suffix.is_empty() {
        return Err(ConfigError::Validation(
            "page_suffix cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawl pacing
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.listing_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "listing_timeout_secs must be >= 1, got {}",
            config.listing_timeout_secs
        )));
    }

    if config.detail_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "detail_timeout_secs must be >= 1, got {}",
            config.detail_timeout_secs
        )));
    }

    if config.progress_interval < 1 {
        return Err(ConfigError::Validation(format!(
            "progress_interval must be >= 1, got {}",
            config.progress_interval
        )));
    }

    Ok(())
}

/// Validates request headers
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the target category set
fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    if config.target_categories.is_empty() {
        return Err(ConfigError::Validation(
            "target_categories must list at least one category".to_string(),
        ));
    }

    if config.target_categories.iter().any(|c| c.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "target_categories cannot contain blank entries".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Checks that a site path is absolute
fn validate_path(name: &str, path: &str) -> Result<(), ConfigError> {
    if !path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{} must start with '/', got '{}'",
            name, path
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_site_config() {
        let mut site = SiteConfig::default();
        assert!(validate_site_config(&site).is_ok());

        site.base_url = "ftp://www.rustore.ru".to_string();
        assert!(matches!(
            validate_site_config(&site),
            Err(ConfigError::InvalidUrl(_))
        ));

        site.base_url = "not a url".to_string();
        assert!(matches!(
            validate_site_config(&site),
            Err(ConfigError::InvalidUrl(_))
        ));

        let mut site = SiteConfig::default();
        site.app_path_prefix = "/catalog/app".to_string();
        assert!(validate_site_config(&site).is_err());

        let mut site = SiteConfig::default();
        site.catalog_path = "catalog/games/all".to_string();
        assert!(validate_site_config(&site).is_err());

        let mut site = SiteConfig::default();
        site.base_url = "https://www.rustore.ru/".to_string();
        assert!(validate_site_config(&site).is_err());
    }

    #[test]
    fn test_validate_crawler_config() {
        let mut crawler = CrawlerConfig::default();
        crawler.request_delay_ms = 0;
        assert!(validate_crawler_config(&crawler).is_ok());

        crawler.max_pages = 0;
        assert!(validate_crawler_config(&crawler).is_err());

        let mut crawler = CrawlerConfig::default();
        crawler.detail_timeout_secs = 0;
        assert!(validate_crawler_config(&crawler).is_err());
    }

    #[test]
    fn test_validate_filter_config() {
        let filter = FilterConfig {
            target_categories: vec![],
        };
        assert!(validate_filter_config(&filter).is_err());

        let filter = FilterConfig {
            target_categories: vec!["Инди".to_string(), "  ".to_string()],
        };
        assert!(validate_filter_config(&filter).is_err());
    }
}
