//! Detail page to [`AppRecord`]
//!
//! Composes the page fetcher, the linked-data lookup, the description
//! renderer and the field coercers. A record is only built once the
//! application node has been found; every other field defaults on its own.

use super::coerce;
use super::description::extract_full_description;
use super::structured::extract_application_node;
use crate::crawler::{PageFetcher, RequestKind};
use crate::record::AppRecord;
use crate::{ExtractError, StructuredDataError};
use scraper::Html;

/// Fetches a detail page and extracts its record
///
/// # Arguments
///
/// * `fetcher` - The page fetcher (sends the referer for detail requests)
/// * `url` - Detail page URL
/// * `app_id` - Identifier copied into the record
///
/// # Returns
///
/// * `Ok(AppRecord)` - The extracted record
/// * `Err(ExtractError::Fetch)` - The page could not be fetched
/// * `Err(ExtractError::StructuredData)` - The page has no usable application node
pub async fn extract_app(
    fetcher: &PageFetcher,
    url: &str,
    app_id: &str,
) -> Result<AppRecord, ExtractError> {
    let body = fetcher.fetch(url, RequestKind::Detail).await?;
    Ok(parse_app_page(&body, app_id)?)
}

/// Builds a record from detail page HTML
pub fn parse_app_page(html: &str, app_id: &str) -> Result<AppRecord, StructuredDataError> {
    let document = Html::parse_document(html);
    let node = extract_application_node(&document)?;

    Ok(AppRecord {
        app_id: app_id.to_string(),
        name: coerce::name(&node),
        short_description: coerce::short_description(&node),
        full_description: extract_full_description(&document),
        rating: coerce::rating(&node),
        rating_count: coerce::rating_count(&node),
        categories: coerce::categories(&node),
        icon_url: coerce::icon_url(&node),
        screenshots: coerce::screenshots(&node),
        developer: coerce::developer(&node),
        age_rating: coerce::age_rating(&node),
    })
}
