//! The unit of output: one app that passed extraction
//!
//! Field names serialize exactly as written here; they form the keys of the
//! JSON artifact.

use serde::{Deserialize, Serialize};

/// Placeholder for an unknown developer name or age rating
pub const UNSPECIFIED: &str = "Не указан";

/// Placeholder for a detail page without rendered description blocks
pub const NO_FULL_DESCRIPTION: &str = "Подробное описание не найдено на странице";

/// Metadata of a single catalog app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppRecord {
    /// Trailing path segment of the detail page URL
    pub app_id: String,
    pub name: String,
    pub short_description: String,
    /// Multi-paragraph text, or [`NO_FULL_DESCRIPTION`]
    pub full_description: String,
    /// Average rating, 0.0 when unknown
    pub rating: f64,
    /// Number of ratings, 0 when unknown
    pub rating_count: u64,
    /// Trimmed, non-empty category names in page order
    pub categories: Vec<String>,
    pub icon_url: String,
    pub screenshots: Vec<String>,
    pub developer: Developer,
    pub age_rating: String,
}

/// Publisher of an app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Developer {
    pub name: String,
    pub url: String,
}

impl Default for Developer {
    fn default() -> Self {
        Self {
            name: UNSPECIFIED.to_string(),
            url: String::new(),
        }
    }
}
