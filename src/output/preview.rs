//! Console preview of matched records

use crate::record::AppRecord;
use std::fmt::Write;

/// Cuts `text` to at most `max_chars` characters, appending `...` when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// Formats one record for the preview list
pub fn format_preview(position: usize, record: &AppRecord, description_chars: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}. {} (ID: {})", position, record.name, record.app_id);
    let _ = writeln!(out, "   Categories: {}", record.categories.join(", "));
    let _ = writeln!(
        out,
        "   Rating: {} ({} ratings)",
        record.rating, record.rating_count
    );
    let _ = writeln!(out, "   Age rating: {}", record.age_rating);
    let _ = writeln!(out, "   Developer: {}", record.developer.name);
    if !record.developer.url.is_empty() {
        let _ = writeln!(out, "   Developer page: {}", record.developer.url);
    }
    let _ = writeln!(out, "   Icon: {}", record.icon_url);
    let _ = write!(
        out,
        "   Short description: {}",
        truncate_chars(&record.short_description, description_chars)
    );

    out
}
