//! Total conversions from application-node fields to typed record values
//!
//! None of these functions fail. Each documents the value it falls back to
//! when a field is missing or has an unexpected shape.

use super::structured::{
    AggregateRating, ApplicationNode, Author, ImageField, LooseText, NumberLike, RatingField,
    Screenshots, SubCategories,
};
use crate::record::{Developer, UNSPECIFIED};
use crate::text::normalize_text;
use serde_json::Value;

/// Average rating; 0.0 when absent, non-numeric, negative, or not finite
pub fn rating(node: &ApplicationNode) -> f64 {
    aggregate(node)
        .and_then(|r| r.rating_value.as_ref())
        .and_then(NumberLike::as_f64)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

/// Number of ratings; 0 when absent, non-numeric, or negative
///
/// Fractional numbers are truncated toward zero.
pub fn rating_count(node: &ApplicationNode) -> u64 {
    aggregate(node)
        .and_then(|r| r.rating_count.as_ref())
        .and_then(NumberLike::as_count)
        .unwrap_or(0)
}

/// Category names in page order, normalized, never blank
pub fn categories(node: &ApplicationNode) -> Vec<String> {
    let raw: Vec<&str> = match &node.sub_categories {
        Some(SubCategories::One(name)) => vec![name.as_str()],
        Some(SubCategories::Many(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(SubCategories::Other(_)) | None => Vec::new(),
    };

    raw.into_iter()
        .filter(|name| !name.trim().is_empty())
        .map(normalize_text)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Developer name and page
///
/// An author object yields its normalized name (or [`UNSPECIFIED`] when the
/// name is missing) and its raw url; a bare string becomes the name with an
/// empty url; anything else gives the [`UNSPECIFIED`]/empty pair.
pub fn developer(node: &ApplicationNode) -> Developer {
    match &node.author {
        Some(Author::Named(org)) => Developer {
            name: org
                .name
                .as_deref()
                .map(normalize_text)
                .unwrap_or_else(|| UNSPECIFIED.to_string()),
            url: org.url.clone().unwrap_or_default(),
        },
        Some(Author::PlainName(name)) => Developer {
            name: normalize_text(name),
            url: String::new(),
        },
        Some(Author::Unknown(_)) | None => Developer::default(),
    }
}

/// Age rating as published; [`UNSPECIFIED`] when absent
pub fn age_rating(node: &ApplicationNode) -> String {
    match &node.typical_age_range {
        Some(LooseText::Text(range)) => range.clone(),
        Some(LooseText::Other(Value::Number(n))) => n.to_string(),
        Some(LooseText::Other(_)) | None => UNSPECIFIED.to_string(),
    }
}

/// Normalized app name; empty when absent
pub fn name(node: &ApplicationNode) -> String {
    text_field(node.name.as_ref())
}

/// Normalized short description; empty when absent
pub fn short_description(node: &ApplicationNode) -> String {
    text_field(node.description.as_ref())
}

/// Icon URL from a plain string or an image object; empty otherwise
pub fn icon_url(node: &ApplicationNode) -> String {
    match &node.image {
        Some(ImageField::Url(url)) => url.clone(),
        Some(ImageField::Object(image)) => image.url.clone().unwrap_or_default(),
        Some(ImageField::Other(_)) | None => String::new(),
    }
}

/// Screenshot URLs taken as published, without validation
pub fn screenshots(node: &ApplicationNode) -> Vec<String> {
    match &node.screenshot {
        Some(Screenshots::One(url)) => vec![url.clone()],
        Some(Screenshots::Many(items)) => items.iter().filter_map(screenshot_url).collect(),
        Some(Screenshots::Other(_)) | None => Vec::new(),
    }
}

fn screenshot_url(item: &Value) -> Option<String> {
    match item {
        Value::String(url) => Some(url.clone()),
        Value::Object(map) => map.get("url").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn aggregate(node: &ApplicationNode) -> Option<&AggregateRating> {
    match &node.aggregate_rating {
        Some(RatingField::Object(rating)) => Some(rating),
        _ => None,
    }
}

fn text_field(field: Option<&LooseText>) -> String {
    field
        .and_then(LooseText::as_str)
        .map(normalize_text)
        .unwrap_or_default()
}

impl NumberLike {
    /// Reads the value as a float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            Self::Other(_) => None,
        }
    }

    /// Reads the value as a non-negative whole count
    pub fn as_count(&self) -> Option<u64> {
        match self {
            Self::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|v| v.is_finite() && *v >= 0.0)
                    .map(|v| v.trunc() as u64)
            }),
            Self::Text(s) => s.trim().parse::<u64>().ok(),
            Self::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn node(value: Value) -> ApplicationNode {
        ApplicationNode::deserialize(&value).unwrap()
    }

    #[test]
    fn test_rating_values() {
        assert_eq!(rating(&node(json!({"aggregateRating": {"ratingValue": 4.6}}))), 4.6);
        assert_eq!(rating(&node(json!({"aggregateRating": {"ratingValue": "3.5"}}))), 3.5);
        assert_eq!(rating(&node(json!({"aggregateRating": {"ratingValue": 5}}))), 5.0);
    }

    #[test]
    fn test_rating_fallbacks_are_zero() {
        let samples = [
            json!({}),
            json!({"aggregateRating": null}),
            json!({"aggregateRating": "high"}),
            json!({"aggregateRating": {}}),
            json!({"aggregateRating": {"ratingValue": null}}),
            json!({"aggregateRating": {"ratingValue": "abc"}}),
            json!({"aggregateRating": {"ratingValue": [4.5]}}),
            json!({"aggregateRating": {"ratingValue": {"v": 1}}}),
            json!({"aggregateRating": {"ratingValue": true}}),
            json!({"aggregateRating": {"ratingValue": -1.0}}),
            json!({"aggregateRating": {"ratingValue": "NaN"}}),
            json!({"aggregateRating": [4.5, 10]}),
        ];

        for sample in samples {
            assert_eq!(rating(&node(sample.clone())), 0.0, "input: {}", sample);
        }
    }

    #[test]
    fn test_rating_count_values() {
        assert_eq!(rating_count(&node(json!({"aggregateRating": {"ratingCount": 1520}}))), 1520);
        assert_eq!(rating_count(&node(json!({"aggregateRating": {"ratingCount": "77"}}))), 77);
        assert_eq!(rating_count(&node(json!({"aggregateRating": {"ratingCount": 12.9}}))), 12);
    }

    #[test]
    fn test_rating_count_fallbacks_are_zero() {
        let samples = [
            json!({}),
            json!({"aggregateRating": {}}),
            json!({"aggregateRating": {"ratingCount": null}}),
            json!({"aggregateRating": {"ratingCount": "many"}}),
            json!({"aggregateRating": {"ratingCount": "4.5"}}),
            json!({"aggregateRating": {"ratingCount": -3}}),
            json!({"aggregateRating": {"ratingCount": [1]}}),
            json!({"aggregateRating": 10}),
            json!({"aggregateRating": [4.5, 10]}),
        ];

        for sample in samples {
            assert_eq!(rating_count(&node(sample.clone())), 0, "input: {}", sample);
        }
    }

    #[test]
    fn test_categories_single_string() {
        let n = node(json!({"applicationSubCategory": "  Ролевые  "}));
        assert_eq!(categories(&n), vec!["Ролевые".to_string()]);
    }

    #[test]
    fn test_categories_list_drops_blank_and_non_strings() {
        let n = node(json!({"applicationSubCategory": ["Шутеры", "  ", "", 5, " Инди\t "]}));
        assert_eq!(categories(&n), vec!["Шутеры".to_string(), "Инди".to_string()]);
    }

    #[test]
    fn test_categories_missing_or_blank() {
        assert!(categories(&node(json!({}))).is_empty());
        assert!(categories(&node(json!({"applicationSubCategory": "   "}))).is_empty());
        assert!(categories(&node(json!({"applicationSubCategory": {"a": 1}}))).is_empty());
    }

    #[test]
    fn test_developer_object() {
        let n = node(json!({"author": {"name": "Acme", "url": "http://x"}}));
        assert_eq!(
            developer(&n),
            Developer {
                name: "Acme".to_string(),
                url: "http://x".to_string()
            }
        );
    }

    #[test]
    fn test_developer_plain_string() {
        let n = node(json!({"author": "Acme"}));
        assert_eq!(
            developer(&n),
            Developer {
                name: "Acme".to_string(),
                url: String::new()
            }
        );
    }

    #[test]
    fn test_developer_missing() {
        let expected = Developer {
            name: UNSPECIFIED.to_string(),
            url: String::new(),
        };
        assert_eq!(developer(&node(json!({}))), expected);
        assert_eq!(developer(&node(json!({"author": 17}))), expected);
        assert_eq!(developer(&node(json!({"author": {"url": ""}}))), expected);
        assert_eq!(developer(&node(json!({"author": ["Acme", "http://x"]}))), expected);
    }

    #[test]
    fn test_age_rating() {
        assert_eq!(age_rating(&node(json!({"typicalAgeRange": "12+"}))), "12+");
        assert_eq!(age_rating(&node(json!({"typicalAgeRange": 16}))), "16");
        assert_eq!(age_rating(&node(json!({}))), UNSPECIFIED);
    }

    #[test]
    fn test_icon_and_screenshots() {
        let n = node(json!({
            "image": "http://icon",
            "screenshot": ["http://a", {"url": "http://b"}, 3]
        }));
        assert_eq!(icon_url(&n), "http://icon");
        assert_eq!(
            screenshots(&n),
            vec!["http://a".to_string(), "http://b".to_string()]
        );

        let n = node(json!({"image": {"url": "http://obj"}}));
        assert_eq!(icon_url(&n), "http://obj");

        let n = node(json!({"image": ["http://icon"]}));
        assert_eq!(icon_url(&n), "");

        let n = node(json!({}));
        assert_eq!(icon_url(&n), "");
        assert!(screenshots(&n).is_empty());
    }

    #[test]
    fn test_text_fields_normalized() {
        let n = node(json!({"name": "  Big   Game ", "description": "Line\n\n\n\nNext"}));
        assert_eq!(name(&n), "Big Game");
        assert_eq!(short_description(&n), "Line\n\nNext");
    }
}
