//! Small text helpers shared by the compactor and the provenance scanners.

/// Truncates `text` to at most `max_chars` characters, appending a marker
/// when truncation occurred. Operates on `char` boundaries, not bytes, so it
/// never panics on multi-byte UTF-8 input.
pub fn truncate_with_marker(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{truncated}... [truncated]")
}

/// Returns true if `text` contains any of `keywords`, case-insensitively.
pub fn contains_any_keyword(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|kw| lower.contains(&kw.to_lowercase()))
}

/// Counts how many of `keywords` appear in `text`, case-insensitively.
pub fn count_matching_keywords(text: &str, keywords: &[&str]) -> usize {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|kw| lower.contains(&kw.to_lowercase()))
        .count()
}

/// A crude per-byte token estimate: four bytes per token plus a small flat
/// overhead, matching the heuristic used throughout this workspace wherever
/// an exact tokenizer would be overkill.
pub fn estimate_tokens(text: &str) -> usize {
    text.len() / 4
}

#[cfg(test)]
#[path = "lib.test.rs"]
mod tests;
