use super::*;

#[test]
fn defaults_match_the_original_tuning() {
    let config = CompactionConfig::default();
    assert_eq!(config.max_tokens, 100_000);
    assert_eq!(config.threshold, 0.8);
    assert_eq!(config.keep_recent, 10);
    assert_eq!(config.summary_max_tokens, 2000);
}

#[test]
fn trigger_tokens_applies_the_threshold() {
    let config = CompactionConfig {
        max_tokens: 1000,
        threshold: 0.5,
        keep_recent: 10,
        summary_max_tokens: 200,
    };
    assert_eq!(config.trigger_tokens(), 500);
}
