use serde::Deserialize;

/// Main configuration structure for Catalog-Sieve
///
/// Every section is optional in the TOML file; missing sections and keys
/// fall back to the defaults of the public RuStore games catalog.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub filter: FilterConfig,
    pub output: OutputConfig,
}

/// Target site layout
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host of the store, without a trailing slash
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the first catalog listing page
    #[serde(rename = "catalog-path")]
    pub catalog_path: String,

    /// Path prefix shared by every app detail page
    #[serde(rename = "app-path-prefix")]
    pub app_path_prefix: String,

    /// Suffix appended to the catalog URL before the page number
    #[serde(rename = "page-suffix")]
    pub page_suffix: String,
}

/// Crawl pacing configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of listing pages to walk, starting at page 1
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Pause after every network call (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Timeout for listing page requests (seconds)
    #[serde(rename = "listing-timeout-secs")]
    pub listing_timeout_secs: u64,

    /// Timeout for detail page requests (seconds)
    #[serde(rename = "detail-timeout-secs")]
    pub detail_timeout_secs: u64,

    /// Log a progress line every N apps during extraction
    #[serde(rename = "progress-interval")]
    pub progress_interval: usize,
}

/// Request header configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    #[serde(rename = "accept-language")]
    pub accept_language: String,
}

/// Category filter configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Apps are kept when at least one of their categories is listed here
    #[serde(rename = "target-categories")]
    pub target_categories: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON artifact
    pub path: String,

    /// Number of records shown in the console preview
    #[serde(rename = "preview-count")]
    pub preview_count: usize,

    /// Short descriptions longer than this are cut in the preview
    #[serde(rename = "preview-description-chars")]
    pub preview_description_chars: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.rustore.ru".to_string(),
            catalog_path: "/catalog/games/all".to_string(),
            app_path_prefix: "/catalog/app/".to_string(),
            page_suffix: "/page-".to_string(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 4,
            request_delay_ms: 800,
            listing_timeout_secs: 8,
            detail_timeout_secs: 10,
            progress_interval: 10,
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            accept_language: "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7".to_string(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        let target_categories = [
            "Шутеры",
            "Аркады",
            "Гоночные",
            "Игры с AR",
            "Головоломки",
            "Словесные",
            "Викторины",
            "Приключения",
            "Ролевые",
            "Инди",
            "Стратегии",
            "Настольные игры",
            "Карточные",
            "Детские",
            "Семейные",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect();

        Self { target_categories }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "filtered_apps.json".to_string(),
            preview_count: 3,
            preview_description_chars: 100,
        }
    }
}

impl Config {
    /// URL of the first catalog listing page
    pub fn catalog_url(&self) -> String {
        format!("{}{}", self.site.base_url, self.site.catalog_path)
    }

    /// URL of the listing page with the given 1-based index
    ///
    /// Page 1 is the bare catalog URL; later pages carry the page suffix.
    pub fn listing_url(&self, page: u32) -> String {
        if page <= 1 {
            self.catalog_url()
        } else {
            format!("{}{}{}", self.catalog_url(), self.site.page_suffix, page)
        }
    }

    /// URL of the detail page for an app identifier
    pub fn detail_url(&self, app_id: &str) -> String {
        format!(
            "{}{}{}",
            self.site.base_url, self.site.app_path_prefix, app_id
        )
    }

    /// Referer sent with detail page requests
    pub fn referer(&self) -> String {
        format!("{}/", self.site.base_url)
    }
}
