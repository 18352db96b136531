//! Extraction of app metadata from detail pages
//!
//! This module contains:
//! - Linked-data lookup of the application node
//! - Total field coercers with documented defaults
//! - The rich-text description renderer
//! - The composed detail-page extractor

mod app;
pub mod coerce;
mod description;
mod structured;

pub use app::{extract_app, parse_app_page};
pub use description::{
    extract_full_description, render_paragraph, rich_children, RichNode,
    PARAGRAPH_CLASS_PATTERN,
};
pub use structured::{
    extract_application_node, find_application_node, AggregateRating, ApplicationNode, Author,
    ImageField, ImageObject, LooseText, NumberLike, Organization, RatingField, Screenshots,
    SubCategories, APPLICATION_TYPE,
};
