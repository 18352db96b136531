//! Linked-data lookup on app detail pages
//!
//! Detail pages embed a `<script type="application/ld+json">` document whose
//! `@graph` holds typed nodes. The node tagged `SoftwareApplication` carries
//! the app metadata. Its loosely-typed sub-fields are modelled as untagged
//! enums so that every shape the site may emit decodes, and the coercers in
//! [`super::coerce`] map each variant to a typed value.

use crate::StructuredDataError;
use scraper::{Html, Selector};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};

/// `@type` tag of the application node
pub const APPLICATION_TYPE: &str = "SoftwareApplication";

const LINKED_DATA_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

/// The application node of a detail page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationNode {
    #[serde(default)]
    pub name: Option<LooseText>,

    #[serde(default)]
    pub description: Option<LooseText>,

    #[serde(default)]
    pub image: Option<ImageField>,

    #[serde(default)]
    pub author: Option<Author>,

    #[serde(default, rename = "aggregateRating")]
    pub aggregate_rating: Option<RatingField>,

    #[serde(default, rename = "applicationSubCategory")]
    pub sub_categories: Option<SubCategories>,

    #[serde(default)]
    pub screenshot: Option<Screenshots>,

    #[serde(default, rename = "typicalAgeRange")]
    pub typical_age_range: Option<LooseText>,
}

/// A field expected to be a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LooseText {
    Text(String),
    Other(Value),
}

impl LooseText {
    /// Returns the string value, if the field was a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Other(_) => None,
        }
    }
}

/// `author`: an organization object, a bare name, or something unusable
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Named(#[serde(deserialize_with = "object_only")] Organization),
    PlainName(String),
    Unknown(Value),
}

/// `aggregateRating`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RatingField {
    Object(#[serde(deserialize_with = "object_only")] AggregateRating),
    Other(Value),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AggregateRating {
    #[serde(default, rename = "ratingValue")]
    pub rating_value: Option<NumberLike>,

    #[serde(default, rename = "ratingCount")]
    pub rating_count: Option<NumberLike>,
}

/// A numeric field that may arrive as a JSON number or a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberLike {
    Number(Number),
    Text(String),
    Other(Value),
}

/// `applicationSubCategory`: one name or a list of names
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubCategories {
    One(String),
    Many(Vec<Value>),
    Other(Value),
}

/// `image`: a URL or an `ImageObject`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ImageField {
    Url(String),
    Object(#[serde(deserialize_with = "object_only")] ImageObject),
    Other(Value),
}

/// Author given as an object (usually a schema.org `Organization`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

/// schema.org `ImageObject`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageObject {
    #[serde(default)]
    pub url: Option<String>,
}

/// Decodes `T` from a JSON object only
///
/// Derived struct decoding also fills fields by position from an array;
/// arrays must fall through to the catch-all variant instead.
fn object_only<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let map = Map::<String, Value>::deserialize(deserializer)?;
    T::deserialize(Value::Object(map)).map_err(D::Error::custom)
}

/// `screenshot`: one URL or a list of URLs
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Screenshots {
    One(String),
    Many(Vec<Value>),
    Other(Value),
}

/// Locates and decodes the application node of a detail page
///
/// # Returns
///
/// * `Ok(ApplicationNode)` - The first `SoftwareApplication` node
/// * `Err(StructuredDataError::MissingScript)` - No linked-data script element
/// * `Err(StructuredDataError::Malformed)` - The script content is not valid JSON
/// * `Err(StructuredDataError::NoApplicationNode)` - No node carries the application type
pub fn extract_application_node(document: &Html) -> Result<ApplicationNode, StructuredDataError> {
    let Ok(selector) = Selector::parse(LINKED_DATA_SELECTOR) else {
        return Err(StructuredDataError::MissingScript);
    };

    let script = document
        .select(&selector)
        .next()
        .ok_or(StructuredDataError::MissingScript)?;

    let payload: String = script.text().collect();
    let value: Value = serde_json::from_str(payload.trim())
        .map_err(|e| StructuredDataError::Malformed(e.to_string()))?;

    let node = find_application_node(&value).ok_or(StructuredDataError::NoApplicationNode)?;

    ApplicationNode::deserialize(node).map_err(|e| StructuredDataError::Malformed(e.to_string()))
}

/// Finds the first application node in a linked-data document
///
/// Accepts an object with an `@graph` collection, a bare array of nodes, or
/// a single top-level node.
pub fn find_application_node(document: &Value) -> Option<&Value> {
    match document {
        Value::Object(map) => match map.get("@graph") {
            Some(Value::Array(nodes)) => nodes.iter().find(|n| is_application(n)),
            Some(_) => None,
            None => is_application(document).then_some(document),
        },
        Value::Array(nodes) => nodes.iter().find(|n| is_application(n)),
        _ => None,
    }
}

/// Returns true if the node's `@type` is (or includes) the application type
fn is_application(node: &Value) -> bool {
    match node.get("@type") {
        Some(Value::String(kind)) => kind == APPLICATION_TYPE,
        Some(Value::Array(kinds)) => kinds
            .iter()
            .any(|k| k.as_str() == Some(APPLICATION_TYPE)),
        _ => false,
    }
}
