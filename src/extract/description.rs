//! Full-description extraction from rendered detail-page markup
//!
//! The rich-text description lives in `div[data-testid="description"]`
//! blocks. Each block holds paragraph elements whose generated class name
//! contains a stable fragment. Paragraph markup is first converted into a
//! small [`RichNode`] tree and then rendered by a pure recursive function,
//! so the rendering rules do not depend on the HTML parser's node types.

use crate::record::NO_FULL_DESCRIPTION;
use crate::text::{collapse_whitespace, normalize_text};
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

const DESCRIPTION_BLOCK_SELECTOR: &str = r#"div[data-testid="description"]"#;

/// Fragment of the generated class name carried by description paragraphs
pub const PARAGRAPH_CLASS_PATTERN: &str = "Pg0h2jm";

/// Markup tree of a paragraph, independent of the HTML parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RichNode {
    Text(String),
    Element {
        tag: String,
        children: Vec<RichNode>,
    },
}

impl RichNode {
    /// Shorthand for an element node
    pub fn element(tag: &str, children: Vec<RichNode>) -> Self {
        Self::Element {
            tag: tag.to_string(),
            children,
        }
    }

    /// Shorthand for a text node
    pub fn text(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Extracts the multi-paragraph description of a detail page
///
/// Non-empty paragraphs are joined with a blank line. When the page has no
/// description block at all, [`NO_FULL_DESCRIPTION`] is returned instead of
/// an empty string.
pub fn extract_full_description(document: &Html) -> String {
    let (Ok(block_selector), Ok(paragraph_selector), Ok(class_pattern)) = (
        Selector::parse(DESCRIPTION_BLOCK_SELECTOR),
        Selector::parse("p"),
        Regex::new(PARAGRAPH_CLASS_PATTERN),
    ) else {
        return NO_FULL_DESCRIPTION.to_string();
    };

    let blocks: Vec<ElementRef> = document.select(&block_selector).collect();
    if blocks.is_empty() {
        return NO_FULL_DESCRIPTION.to_string();
    }

    let mut paragraphs = Vec::new();
    for block in blocks {
        for paragraph in block.select(&paragraph_selector) {
            let matches_class = paragraph
                .value()
                .attr("class")
                .is_some_and(|class| class_pattern.is_match(class));
            if !matches_class {
                continue;
            }

            let text = render_paragraph(&rich_children(paragraph));
            if !text.trim().is_empty() {
                paragraphs.push(text);
            }
        }
    }

    tracing::trace!("Extracted {} description paragraphs", paragraphs.len());
    paragraphs.join("\n\n")
}

/// Renders the children of one paragraph to plain text
///
/// # Rendering Rules
///
/// Children are visited depth-first, left to right:
/// - text: non-breaking spaces become spaces, whitespace runs collapse to one space
/// - `<br>`: a literal newline
/// - any other element: its children rendered by the same rules
///
/// The fragments of one level are joined with single spaces and passed
/// through [`normalize_text`].
///
/// # Examples
///
/// ```
/// use catalog_sieve::extract::{render_paragraph, RichNode};
///
/// let children = vec![
///     RichNode::text("first"),
///     RichNode::element("br", vec![]),
///     RichNode::element("b", vec![RichNode::text("second")]),
/// ];
/// assert_eq!(render_paragraph(&children), "first \n second");
/// ```
pub fn render_paragraph(children: &[RichNode]) -> String {
    let fragments: Vec<String> = children
        .iter()
        .map(|child| match child {
            RichNode::Text(text) => collapse_whitespace(text),
            RichNode::Element { tag, .. } if tag == "br" => "\n".to_string(),
            RichNode::Element { children, .. } => render_paragraph(children),
        })
        .collect();

    normalize_text(&fragments.join(" "))
}

/// Converts an element's children into [`RichNode`]s
///
/// Comments, doctypes and processing instructions are dropped.
pub fn rich_children(element: ElementRef<'_>) -> Vec<RichNode> {
    element
        .children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => Some(RichNode::Text(String::from(&**text))),
            Node::Element(el) => ElementRef::wrap(child).map(|nested| RichNode::Element {
                tag: el.name().to_ascii_lowercase(),
                children: rich_children(nested),
            }),
            _ => None,
        })
        .collect()
}
