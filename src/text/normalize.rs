/// Text normalization for scraped content
///
/// Two flavours are needed: [`normalize_text`] keeps paragraph structure
/// (explicit newlines survive), while [`collapse_whitespace`] flattens a raw
/// markup text node onto a single line.
use regex::Regex;
use std::sync::OnceLock;

fn horizontal_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]+").expect("static pattern"))
}

fn blank_line_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("static pattern"))
}

/// Normalizes scraped text while preserving line structure
///
/// # Rules
///
/// 1. Runs of spaces and tabs become a single space
/// 2. Three or more consecutive newlines become exactly two
/// 3. Leading and trailing whitespace is trimmed
///
/// The operation is idempotent.
///
/// # Examples
///
/// ```
/// use catalog_sieve::text::normalize_text;
///
/// assert_eq!(normalize_text(" a   b\n\n\n\nc  "), "a b\n\nc");
/// ```
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = horizontal_runs().replace_all(text, " ");
    let text = blank_line_runs().replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Flattens a raw text node
///
/// Non-breaking spaces become ordinary spaces and every run of whitespace,
/// newlines included, becomes a single space. Surrounding spaces are kept so
/// that adjacent inline fragments do not run together.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = false;

    for ch in text.chars() {
        if ch == '\u{a0}' || ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }

    out
}
