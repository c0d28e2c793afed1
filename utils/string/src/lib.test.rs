use super::*;
use pretty_assertions::assert_eq;

#[test]
fn truncate_leaves_short_text_untouched() {
    assert_eq!(truncate_with_marker("hello", 10), "hello");
}

#[test]
fn truncate_appends_marker_when_over_limit() {
    assert_eq!(truncate_with_marker("hello world", 5), "hello... [truncated]");
}

#[test]
fn truncate_counts_chars_not_bytes() {
    let text = "héllo wörld";
    let truncated = truncate_with_marker(text, 5);
    assert_eq!(truncated.chars().count(), "héllo".chars().count() + "... [truncated]".len());
}

#[test]
fn contains_any_keyword_is_case_insensitive() {
    assert!(contains_any_keyword("Formation Energy found", &["energy"]));
    assert!(!contains_any_keyword("nothing relevant", &["energy", "error"]));
}

#[test]
fn count_matching_keywords_counts_each_hit_once() {
    assert_eq!(
        count_matching_keywords("the error was fixed, another error logged", &["error", "fixed"]),
        2
    );
}

#[test]
fn estimate_tokens_uses_four_bytes_per_token() {
    assert_eq!(estimate_tokens("abcd"), 1);
    assert_eq!(estimate_tokens("abcdefgh"), 2);
}
