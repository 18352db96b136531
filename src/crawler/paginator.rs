//! Catalog listing pages
//!
//! Listing pages expose app cards as `<a data-testid="app-card">` anchors
//! pointing at detail pages. The identifier of an app is the trailing path
//! segment of the card's href.

use crate::config::Config;
use crate::crawler::{PageFetcher, RequestKind};
use crate::FetchError;
use percent_encoding::percent_decode_str;
use scraper::{Html, Selector};
use url::Url;

const APP_CARD_SELECTOR: &str = r#"a[data-testid="app-card"][href]"#;

/// App identifiers scraped from one listing page, in page order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    /// 1-based page index
    pub index: u32,

    /// The URL the page was fetched from
    pub url: String,

    /// Identifiers in anchor order; duplicates are kept
    pub app_ids: Vec<String>,
}

/// Fetches one listing page and extracts its app identifiers
///
/// # Returns
///
/// * `Ok(CatalogPage)` - The page's identifiers (possibly none)
/// * `Err(FetchError)` - The page could not be fetched
pub async fn list_page(
    fetcher: &PageFetcher,
    config: &Config,
    index: u32,
) -> Result<CatalogPage, FetchError> {
    let url = config.listing_url(index);
    let body = fetcher.fetch(&url, RequestKind::Listing).await?;
    let app_ids = parse_listing(&body, &url, &config.site.app_path_prefix);

    Ok(CatalogPage {
        index,
        url,
        app_ids,
    })
}

/// Extracts app identifiers from listing page HTML
///
/// Anchors are resolved against `page_url`. An anchor is kept when it points
/// at the same origin and its path starts with `app_path_prefix`.
///
/// # Example
///
/// ```
/// use catalog_sieve::crawler::parse_listing;
///
/// let html = r#"<a data-testid="app-card" href="/catalog/app/com.example.game">Game</a>"#;
/// let ids = parse_listing(html, "https://www.rustore.ru/catalog/games/all", "/catalog/app/");
/// assert_eq!(ids, vec!["com.example.game"]);
/// ```
pub fn parse_listing(html: &str, page_url: &str, app_path_prefix: &str) -> Vec<String> {
    let Ok(base) = Url::parse(page_url) else {
        tracing::warn!("Cannot resolve app cards against invalid URL {}", page_url);
        return Vec::new();
    };
    let Ok(selector) = Selector::parse(APP_CARD_SELECTOR) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut app_ids = Vec::new();

    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        match app_id_from_href(href, &base, app_path_prefix) {
            Some(app_id) => app_ids.push(app_id),
            None => tracing::trace!("Skipping app card with href {}", href),
        }
    }

    app_ids
}

/// Resolves an app card href to an app identifier
fn app_id_from_href(href: &str, base: &Url, app_path_prefix: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let resolved = base.join(href).ok()?;
    if resolved.origin() != base.origin() {
        return None;
    }

    let rest = resolved.path().strip_prefix(app_path_prefix)?;
    let segment = rest.trim_end_matches('/').rsplit('/').next()?;

    if segment.is_empty() {
        return None;
    }

    // Joining percent-encodes non-ASCII; identifiers keep the raw text
    match percent_decode_str(segment).decode_utf8() {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(_) => Some(segment.to_string()),
    }
}
