//! Text cleaning shared by every extractor
//!
//! All strings taken from listing pages, linked data, and rendered markup
//! pass through [`normalize_text`] before they reach an `AppRecord`.

mod normalize;

pub use normalize::{collapse_whitespace, normalize_text};
