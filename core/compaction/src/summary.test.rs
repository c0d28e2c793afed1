use super::*;

#[test]
fn format_messages_tags_role_and_name() {
    let messages = vec![Message::user("hello"), Message::assistant("hi").with_name("agent")];
    let formatted = format_messages_for_summary(&messages);
    assert!(formatted.contains("[USER]: hello"));
    assert!(formatted.contains("[ASSISTANT (agent)]: hi"));
}

#[test]
fn format_messages_truncates_long_content() {
    let long = "x".repeat(5000);
    let formatted = format_messages_for_summary(&[Message::user(long)]);
    assert!(formatted.contains("... [truncated]"));
}

#[test]
fn extract_key_points_picks_up_findings() {
    let messages = vec![Message::assistant("Found a stable phase at 0 eV/atom")];
    let summary = extract_key_points(&messages);
    assert!(summary.contains("- assistant: Found a stable phase"));
}

#[test]
fn extract_key_points_emits_independent_points_for_one_message() {
    let messages = vec![Message::user("found a stable result but hit an error during optimization")];
    let summary = extract_key_points(&messages);
    assert!(summary.contains("- user: found a stable result"));
    assert!(summary.contains("- User request: found a stable result"));
    assert!(summary.contains("- Issue: found a stable result"));
}

#[test]
fn extract_key_points_reports_short_user_requests() {
    let messages = vec![Message::user("compute the formation energy of LiFePO4")];
    let summary = extract_key_points(&messages);
    assert!(summary.contains("- User request: compute the formation energy of LiFePO4"));
}

#[test]
fn extract_key_points_reports_errors() {
    let messages = vec![Message::assistant("The DFT relaxation failed to converge")];
    let summary = extract_key_points(&messages);
    assert!(summary.contains("- Issue:"));
}

#[test]
fn extract_key_points_falls_back_when_nothing_matches() {
    let messages = vec![Message::assistant(
        "a very long line of unremarkable narration that exceeds the short-line threshold by a wide margin indeed",
    )];
    let summary = extract_key_points(&messages);
    assert_eq!(summary, "Previous conversation contained 1 messages.");
}

#[test]
fn extract_key_points_caps_at_twenty() {
    let messages: Vec<Message> = (0..30).map(|i| Message::assistant(format!("found result {i}"))).collect();
    let summary = extract_key_points(&messages);
    assert!(summary.contains("additional points truncated"));
    assert_eq!(summary.lines().count(), 21);
}
